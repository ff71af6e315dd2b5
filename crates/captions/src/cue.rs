//! Shared cue assembly for the VTT and SRT renderers.
//!
//! A segment yields one basic cue, or a run of per-word highlight cues
//! interleaved with filler cues over the gaps between timed words. Words
//! without usable timing still appear in every cue's text but never get a
//! highlight cue of their own; timing is redistributed only inside a valid
//! segment envelope, never invented.

use transcript::types::{Segment, Word};

use crate::{CaptionsConfig, HighlightStyle, SpeakerNameMode};

/// One time-coded caption, renderer-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn highlight_tags(style: HighlightStyle) -> (&'static str, &'static str) {
    match style {
        HighlightStyle::Underline => ("<u>", "</u>"),
        HighlightStyle::Bold => ("<b>", "</b>"),
        HighlightStyle::Italic => ("<i>", "</i>"),
    }
}

/// The speaker a cue is attributed to: the segment's own label, falling
/// back to its first word's.
pub(crate) fn segment_speaker(segment: &Segment) -> Option<&str> {
    segment
        .speaker
        .as_deref()
        .or_else(|| segment.words.first().and_then(|w| w.speaker.as_deref()))
}

pub(crate) fn speaker_prefix(
    current: Option<&str>,
    previous: Option<&str>,
    mode: SpeakerNameMode,
) -> String {
    let Some(current) = current else {
        return String::new();
    };
    match mode {
        SpeakerNameMode::Never => String::new(),
        SpeakerNameMode::Always => format!("{}: ", escape_html(current)),
        SpeakerNameMode::WhenChanges => {
            if previous != Some(current) {
                format!("{}: ", escape_html(current))
            } else {
                String::new()
            }
        }
    }
}

/// Build every cue for one segment. `previous_speaker` is the resolved
/// speaker of the preceding segment; it advances per segment, so all cues
/// of one segment share the same prefix.
pub(crate) fn segment_cues(
    segment: &Segment,
    config: &CaptionsConfig,
    previous_speaker: Option<&str>,
) -> Vec<Cue> {
    let prefix = speaker_prefix(
        segment_speaker(segment),
        previous_speaker,
        config.include_speaker_names,
    );

    if config.highlight_words && !segment.words.is_empty() {
        highlight_cues(segment, config, &prefix)
    } else {
        vec![basic_cue(segment, &prefix)]
    }
}

fn basic_cue(segment: &Segment, prefix: &str) -> Cue {
    let end = if segment.valid_envelope().is_some() {
        segment.end
    } else {
        // Unknown envelope end: fall back to the last timed word rather
        // than emit a cue that ends before it starts.
        segment
            .words
            .iter()
            .rev()
            .find_map(|w| w.end)
            .unwrap_or(segment.start)
            .max(segment.start)
    };

    Cue {
        start: segment.start,
        end,
        text: format!("{prefix}{}", escape_html(segment.text.trim())),
    }
}

fn highlight_cues(segment: &Segment, config: &CaptionsConfig, prefix: &str) -> Vec<Cue> {
    let mut words = segment.words.clone();
    if let Some((start, end)) = segment.valid_envelope() {
        distribute_missing_timing(&mut words, start, end);
    }

    let Some((first_start, _)) = words.iter().find_map(Word::valid_span) else {
        // Nothing to anchor on: this segment produces no cues at all.
        return Vec::new();
    };

    let (open, close) = highlight_tags(config.highlight_with);
    let mut cues = Vec::new();
    let mut last_end = first_start;

    for (idx, word) in words.iter().enumerate() {
        let Some((start, end)) = word.valid_span() else {
            continue;
        };

        if start > last_end {
            cues.push(Cue {
                start: last_end,
                end: start,
                text: format!("{prefix}{}", plain_text(&words)),
            });
        }

        cues.push(Cue {
            start,
            end,
            text: format!("{prefix}{}", highlighted_text(&words, idx, open, close)),
        });
        last_end = end;
    }

    if let Some((_, envelope_end)) = segment.valid_envelope() {
        if envelope_end > last_end {
            cues.push(Cue {
                start: last_end,
                end: envelope_end,
                text: format!("{prefix}{}", plain_text(&words)),
            });
        }
    }

    cues
}

fn plain_text(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| escape_html(&w.text))
        .collect::<Vec<_>>()
        .join(" ")
}

fn highlighted_text(words: &[Word], highlight_idx: usize, open: &str, close: &str) -> String {
    words
        .iter()
        .enumerate()
        .map(|(idx, w)| {
            let escaped = escape_html(&w.text);
            if idx == highlight_idx {
                format!("{open}{escaped}{close}")
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assign even slices of the envelope to words with no usable timing.
/// Words that already carry a valid span are left alone.
fn distribute_missing_timing(words: &mut [Word], start: f64, end: f64) {
    let slice = (end - start) / words.len() as f64;
    for (idx, word) in words.iter_mut().enumerate() {
        if word.valid_span().is_none() {
            word.start = Some(start + idx as f64 * slice);
            word.end = Some(start + (idx + 1) as f64 * slice);
        }
    }
}
