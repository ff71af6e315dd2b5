//! SubRip rendering. Same cue stream as VTT, framed with 1-based index
//! lines, comma millisecond separators, and no header.

use transcript::types::Transcript;

use crate::cue::{segment_cues, segment_speaker};
use crate::time::format_srt_timestamp;
use crate::CaptionsConfig;

pub(crate) fn render_srt(transcript: &Transcript, config: &CaptionsConfig) -> String {
    let mut out = String::new();
    let mut previous_speaker: Option<String> = None;
    let mut index = 0usize;

    for segment in &transcript.segments {
        for cue in segment_cues(segment, config, previous_speaker.as_deref()) {
            index += 1;
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!(
                "{index}\n{} --> {}\n{}\n",
                format_srt_timestamp(cue.start),
                format_srt_timestamp(cue.end),
                cue.text,
            ));
        }
        previous_speaker = segment_speaker(segment).map(str::to_string);
    }

    out
}
