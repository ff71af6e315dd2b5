//! Simplified JSON rendering: short stable speaker keys plus flat
//! segment records, for consumers that don't care about word timing.

use std::collections::{BTreeMap, BTreeSet};

use transcript::types::{Segment, Transcript};

const DEFAULT_SPEAKER: &str = "SPEAKER_00";

#[derive(Debug, serde::Serialize)]
struct SimplifiedTranscript {
    speakers: BTreeMap<String, String>,
    segments: Vec<SimplifiedSegment>,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SimplifiedSegment {
    speaker_label: String,
    start: f64,
    end: f64,
    text: String,
}

fn effective_speaker(segment: &Segment) -> &str {
    segment
        .speaker
        .as_deref()
        .or_else(|| segment.words.first().and_then(|w| w.speaker.as_deref()))
        .unwrap_or(DEFAULT_SPEAKER)
}

pub(crate) fn render_json(transcript: &Transcript) -> String {
    // The label universe spans segment and word level; sorting it gives
    // every label a stable spk_N key.
    let mut labels: BTreeSet<&str> = BTreeSet::new();
    for segment in &transcript.segments {
        labels.insert(effective_speaker(segment));
        for word in &segment.words {
            if let Some(speaker) = word.speaker.as_deref() {
                labels.insert(speaker);
            }
        }
    }
    if labels.is_empty() {
        labels.insert(DEFAULT_SPEAKER);
    }

    let key_by_label: BTreeMap<&str, String> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (*label, format!("spk_{idx}")))
        .collect();

    let simplified = SimplifiedTranscript {
        speakers: key_by_label
            .iter()
            .map(|(label, key)| (key.clone(), label.to_string()))
            .collect(),
        segments: transcript
            .segments
            .iter()
            .map(|segment| SimplifiedSegment {
                speaker_label: key_by_label
                    .get(effective_speaker(segment))
                    .cloned()
                    .unwrap_or_else(|| "spk_0".to_string()),
                start: segment.start,
                end: segment.end,
                text: segment.text.trim().to_string(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&simplified).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript::types::Word;

    fn segment(start: f64, end: f64, text: &str, speaker: Option<&str>) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
            speaker: speaker.map(str::to_string),
            words: vec![],
        }
    }

    #[test]
    fn speakers_map_is_alphabetical() {
        let transcript = Transcript {
            segments: vec![
                segment(0.0, 2.5, "Hello, welcome to the podcast.", Some("Luciano")),
                segment(2.5, 5.0, "Thanks for having me!", Some("Eoin")),
            ],
        };

        let parsed: serde_json::Value = serde_json::from_str(&render_json(&transcript)).unwrap();

        assert_eq!(parsed["speakers"]["spk_0"], "Eoin");
        assert_eq!(parsed["speakers"]["spk_1"], "Luciano");
        assert_eq!(parsed["segments"][0]["speakerLabel"], "spk_1");
        assert_eq!(parsed["segments"][1]["speakerLabel"], "spk_0");
        assert_eq!(parsed["segments"][0]["start"], 0.0);
        assert_eq!(parsed["segments"][1]["end"], 5.0);
        assert_eq!(
            parsed["segments"][0]["text"],
            "Hello, welcome to the podcast."
        );
    }

    #[test]
    fn word_level_speakers_join_the_label_universe() {
        let transcript = Transcript {
            segments: vec![Segment {
                start: 0.0,
                end: 1.0,
                text: "hi".to_string(),
                speaker: Some("Beta".to_string()),
                words: vec![Word {
                    text: "hi".to_string(),
                    start: Some(0.0),
                    end: Some(1.0),
                    speaker: Some("Alpha".to_string()),
                    score: None,
                }],
            }],
        };

        let parsed: serde_json::Value = serde_json::from_str(&render_json(&transcript)).unwrap();

        assert_eq!(parsed["speakers"]["spk_0"], "Alpha");
        assert_eq!(parsed["speakers"]["spk_1"], "Beta");
        // Segment-level speaker wins for attribution.
        assert_eq!(parsed["segments"][0]["speakerLabel"], "spk_1");
    }

    #[test]
    fn no_speakers_seeds_the_default_label() {
        let transcript = Transcript {
            segments: vec![segment(0.0, 1.0, "anonymous", None)],
        };

        let parsed: serde_json::Value = serde_json::from_str(&render_json(&transcript)).unwrap();

        assert_eq!(parsed["speakers"]["spk_0"], "SPEAKER_00");
        assert_eq!(parsed["segments"][0]["speakerLabel"], "spk_0");
    }

    #[test]
    fn output_is_pretty_printed_with_two_space_indent() {
        let transcript = Transcript {
            segments: vec![segment(0.0, 1.0, "x", Some("A"))],
        };
        let json = render_json(&transcript);
        assert!(json.starts_with("{\n  \"speakers\""));
    }

    #[test]
    fn unattributed_segment_among_named_speakers_gets_default_label() {
        let transcript = Transcript {
            segments: vec![
                segment(0.0, 1.0, "named", Some("Zoe")),
                segment(1.0, 2.0, "anonymous", None),
            ],
        };

        let parsed: serde_json::Value = serde_json::from_str(&render_json(&transcript)).unwrap();

        assert_eq!(parsed["speakers"]["spk_0"], "SPEAKER_00");
        assert_eq!(parsed["speakers"]["spk_1"], "Zoe");
        assert_eq!(parsed["segments"][0]["speakerLabel"], "spk_1");
        assert_eq!(parsed["segments"][1]["speakerLabel"], "spk_0");
    }

    #[test]
    fn segment_text_is_trimmed() {
        let transcript = Transcript {
            segments: vec![segment(0.0, 1.0, "  padded  ", Some("A"))],
        };
        let parsed: serde_json::Value = serde_json::from_str(&render_json(&transcript)).unwrap();
        assert_eq!(parsed["segments"][0]["text"], "padded");
    }
}
