//! WebVTT rendering.

use transcript::types::Transcript;

use crate::cue::{segment_cues, segment_speaker};
use crate::time::format_vtt_timestamp;
use crate::CaptionsConfig;

pub(crate) fn render_vtt(transcript: &Transcript, config: &CaptionsConfig) -> String {
    let mut out = String::from("WEBVTT\n");
    let mut previous_speaker: Option<String> = None;

    for segment in &transcript.segments {
        for cue in segment_cues(segment, config, previous_speaker.as_deref()) {
            out.push('\n');
            out.push_str(&format_vtt_timestamp(cue.start));
            out.push_str(" --> ");
            out.push_str(&format_vtt_timestamp(cue.end));
            out.push('\n');
            out.push_str(&cue.text);
            out.push('\n');
        }
        previous_speaker = segment_speaker(segment).map(str::to_string);
    }

    out
}
