/// One surface token from the recognizer, including any attached
/// punctuation ("Hello,", "Bytes."). Whitespace is never part of a word.
///
/// Timing is optional: alignment can fail for a word, and downstream edits
/// may create words whose timing is only partially known. When both bounds
/// are present, `start <= end` must hold.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Recognizer confidence in `[0, 1]`. Cleared to `None` once an edit
    /// reshapes this word's text or timing; the original confidence no
    /// longer describes what the word says.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: None,
            end: None,
            speaker: None,
            score: None,
        }
    }

    /// `(start, end)` when both bounds are present and span a positive
    /// duration. Zero-duration sentinels and half-known timing yield `None`.
    pub fn valid_span(&self) -> Option<(f64, f64)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) if e > s => Some((s, e)),
            _ => None,
        }
    }
}

/// A contiguous stretch of speech: a time envelope, the rendered text, and
/// the per-word stream the text derives from.
///
/// # Invariant
///
/// After any refinement step, `text` equals the space-joined `words` texts
/// whenever `words` is non-empty. The words array is the source of truth;
/// `text` on raw input may be stale and is rebuilt on first mutation.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub start: f64,
    /// `0.0` means the segment end is unknown; renderers treat such
    /// segments specially instead of trusting the envelope.
    pub end: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
}

impl Segment {
    /// The text the words array spells out, or the trimmed `text` field for
    /// segments that carry no words.
    pub fn words_text(&self) -> String {
        if self.words.is_empty() {
            self.text.trim().to_string()
        } else {
            crate::words::reconstruct_text(
                &self.words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>(),
            )
        }
    }

    /// `(start, end)` when the envelope is usable: a known end (`!= 0`)
    /// strictly after the start.
    pub fn valid_envelope(&self) -> Option<(f64, f64)> {
        if self.end > 0.0 && self.end > self.start {
            Some((self.start, self.end))
        } else {
            None
        }
    }
}

/// An ordered sequence of segments. Segment time ranges are trusted to be
/// ordered; the refinement steps never reorder them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transcript {
    pub segments: Vec<Segment>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("segment {segment}, word {word}: empty word text")]
    EmptyWordText { segment: usize, word: usize },

    #[error("segment {segment}, word {word}: start {start} is after end {end}")]
    WordSpanInverted {
        segment: usize,
        word: usize,
        start: f64,
        end: f64,
    },

    #[error("segment {segment}: start {start} is after end {end}")]
    SegmentSpanInverted {
        segment: usize,
        start: f64,
        end: f64,
    },
}

impl Transcript {
    /// Shape validation for raw input, run once at the pipeline boundary
    /// before any step mutates the transcript.
    pub fn validate(&self) -> Result<(), ShapeError> {
        for (si, segment) in self.segments.iter().enumerate() {
            if segment.end != 0.0 && segment.end < segment.start {
                return Err(ShapeError::SegmentSpanInverted {
                    segment: si,
                    start: segment.start,
                    end: segment.end,
                });
            }

            for (wi, word) in segment.words.iter().enumerate() {
                if word.text.is_empty() {
                    return Err(ShapeError::EmptyWordText {
                        segment: si,
                        word: wi,
                    });
                }
                if let (Some(s), Some(e)) = (word.start, word.end) {
                    if s > e {
                        return Err(ShapeError::WordSpanInverted {
                            segment: si,
                            word: wi,
                            start: s,
                            end: e,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
