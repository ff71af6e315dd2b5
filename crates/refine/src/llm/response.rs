//! Tolerant parsing of the model's structured reply.

use std::collections::BTreeMap;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct RefinementReply {
    pub identified_speakers: BTreeMap<String, String>,
    pub updates: Vec<SegmentUpdate>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct SegmentUpdate {
    pub idx: usize,
    pub text: String,
}

/// Extract the JSON object from a possibly-chatty reply: everything from
/// the first `{` to the last `}`. Anything that does not parse to the
/// expected shape yields `None`, which the caller treats as "no changes".
pub(super) fn parse_reply(reply: &str) -> Option<RefinementReply> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&reply[start..=end]).ok()
}
