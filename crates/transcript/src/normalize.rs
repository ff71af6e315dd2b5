//! Split segments into caption-sized pieces.
//!
//! A single left-to-right pass over each segment's words maintains an
//! accumulator that flushes on speaker changes, on hard count/char limits,
//! and softly after punctuation once the piece is close enough to full.
//! Segments without words pass through unchanged.

use crate::types::{Segment, Transcript, Word};
use crate::words::reconstruct_text;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizationConfig {
    pub normalize: bool,
    pub max_chars_per_segment: usize,
    pub max_words_per_segment: usize,
    pub split_segment_at_speaker_change: bool,
    /// Fraction of either limit after which a punctuation-final word ends
    /// the piece early.
    pub punctuation_split_threshold: f64,
    pub punctuation_chars: Vec<char>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            max_chars_per_segment: 48,
            max_words_per_segment: 10,
            split_segment_at_speaker_change: true,
            punctuation_split_threshold: 0.7,
            punctuation_chars: vec!['.', ',', '?', '!', ';', ':'],
        }
    }
}

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeStats {
    pub segments_in: usize,
    pub segments_out: usize,
    pub splits: usize,
    pub words_per_segment: Distribution,
    pub chars_per_segment: Distribution,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Distribution {
    pub min: usize,
    pub max: usize,
    pub avg: f64,
    pub p95: usize,
}

impl Distribution {
    fn from_values(mut values: Vec<usize>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        values.sort_unstable();
        let n = values.len();
        let sum: usize = values.iter().sum();
        // Nearest-rank percentile.
        let rank = ((0.95 * n as f64).ceil() as usize).max(1);
        Self {
            min: values[0],
            max: values[n - 1],
            avg: sum as f64 / n as f64,
            p95: values[rank - 1],
        }
    }
}

/// Replace `transcript.segments` with caption-sized pieces.
///
/// Pass-through when `normalize` is off. Never reorders segments and never
/// merges across segment boundaries.
pub fn normalize(transcript: &mut Transcript, config: &NormalizationConfig) -> NormalizeStats {
    let segments_in = transcript.segments.len();

    if config.normalize {
        let mut out = Vec::with_capacity(segments_in);
        for segment in transcript.segments.drain(..) {
            if segment.words.is_empty() {
                out.push(segment);
            } else {
                out.extend(split_segment(&segment, config));
            }
        }
        transcript.segments = out;
    }

    let segments_out = transcript.segments.len();
    NormalizeStats {
        segments_in,
        segments_out,
        splits: segments_out.saturating_sub(segments_in),
        words_per_segment: Distribution::from_values(
            transcript
                .segments
                .iter()
                .map(|s| s.words.len())
                .collect(),
        ),
        chars_per_segment: Distribution::from_values(
            transcript
                .segments
                .iter()
                .map(|s| s.text.chars().count())
                .collect(),
        ),
    }
}

fn split_segment(segment: &Segment, config: &NormalizationConfig) -> Vec<Segment> {
    let mut pieces = Vec::new();
    let mut builder = PieceBuilder::default();
    let last_idx = segment.words.len() - 1;

    for (idx, word) in segment.words.iter().enumerate() {
        if config.split_segment_at_speaker_change
            && !builder.is_empty()
            && word.speaker.is_some()
            && word.speaker != builder.speaker
        {
            pieces.push(builder.emit(segment));
        }

        let joined_chars = builder.chars
            + usize::from(!builder.is_empty())
            + word.text.chars().count();
        let word_count = builder.words.len() + 1;
        if !builder.is_empty()
            && (word_count > config.max_words_per_segment
                || joined_chars > config.max_chars_per_segment)
        {
            pieces.push(builder.emit(segment));
        }

        builder.push(word);

        if idx < last_idx
            && builder.fill_ratio(config) >= config.punctuation_split_threshold
            && ends_with_punctuation(&word.text, &config.punctuation_chars)
        {
            pieces.push(builder.emit(segment));
        }
    }

    if !builder.is_empty() {
        pieces.push(builder.emit(segment));
    }

    pieces
}

fn ends_with_punctuation(text: &str, punctuation: &[char]) -> bool {
    text.chars()
        .next_back()
        .is_some_and(|c| punctuation.contains(&c))
}

#[derive(Debug, Default)]
struct PieceBuilder {
    words: Vec<Word>,
    chars: usize,
    speaker: Option<String>,
}

impl PieceBuilder {
    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn push(&mut self, word: &Word) {
        self.chars += usize::from(!self.words.is_empty()) + word.text.chars().count();
        if word.speaker.is_some() {
            self.speaker = word.speaker.clone();
        }
        self.words.push(word.clone());
    }

    fn fill_ratio(&self, config: &NormalizationConfig) -> f64 {
        let by_chars = self.chars as f64 / config.max_chars_per_segment as f64;
        let by_words = self.words.len() as f64 / config.max_words_per_segment as f64;
        by_chars.max(by_words)
    }

    /// Emit the accumulated piece and reset. Timing comes from the piece's
    /// own words, falling back to the source envelope when a word carries
    /// no timestamp.
    fn emit(&mut self, source: &Segment) -> Segment {
        let words = std::mem::take(&mut self.words);
        self.chars = 0;
        let speaker = self.speaker.take().or_else(|| source.speaker.clone());

        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        Segment {
            start: words
                .first()
                .and_then(|w| w.start)
                .unwrap_or(source.start),
            end: words.last().and_then(|w| w.end).unwrap_or(source.end),
            text: reconstruct_text(&texts),
            speaker,
            words,
        }
    }
}
