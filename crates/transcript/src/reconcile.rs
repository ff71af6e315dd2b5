//! Apply a rewritten word sequence to a segment while preserving timing.
//!
//! Timing is never re-derived from audio. When the rewrite reshapes the
//! word stream, timing is only redistributed: removed words donate their
//! span to a neighbor, inserted words take half of the previous word's
//! span, and every touched word loses its confidence score.
//!
//! Removals ahead of the first surviving word have no previous neighbor to
//! extend, so their span accumulates in a pending buffer and is donated to
//! the next KEEP (start extended backward) or ADD (span inherited whole).
//! This "extend next" policy is deliberately asymmetric with the
//! "extend previous" policy used after the first survivor.

use crate::diff::{compute_diff, DiffOp};
use crate::types::{Segment, Word};
use crate::words::reconstruct_text;

/// What `reconcile_segment` did with the patched words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied,
    /// The patched sequence was empty while the segment still has words.
    /// The segment was left untouched; wiping it would discard timing that
    /// can never be recovered.
    SkippedEmptyPatch,
}

/// Rewrite `segment` to spell out `patched`, redistributing per-word timing.
///
/// Deterministic, and idempotent when called twice with the same `patched`
/// sequence (the second call takes the same-length fast path).
pub fn reconcile_segment(segment: &mut Segment, patched: &[String]) -> ReconcileOutcome {
    if patched.is_empty() && !segment.words.is_empty() {
        tracing::warn!(
            segment_start = segment.start,
            word_count = segment.words.len(),
            "reconcile_skipped_empty_patch"
        );
        return ReconcileOutcome::SkippedEmptyPatch;
    }

    // Segments without a words array only carry text.
    if segment.words.is_empty() {
        segment.text = reconstruct_text(patched);
        return ReconcileOutcome::Applied;
    }

    if segment.words.len() == patched.len() {
        for (word, text) in segment.words.iter_mut().zip(patched) {
            word.text = text.clone();
        }
        segment.text = reconstruct_text(patched);
        return ReconcileOutcome::Applied;
    }

    let orig_texts: Vec<String> = segment.words.iter().map(|w| w.text.clone()).collect();
    let ops = compute_diff(&orig_texts, patched);

    let mut rebuilt: Vec<Word> = Vec::with_capacity(patched.len());
    let mut pending: Option<PendingSpan> = None;

    for op in ops {
        match op {
            DiffOp::Keep { orig_idx, word, .. } => {
                let mut kept = segment.words[orig_idx].clone();
                kept.text = word;
                if let Some(span) = pending.take() {
                    if span.start.is_some() {
                        kept.start = span.start;
                    }
                    kept.score = None;
                }
                rebuilt.push(kept);
            }
            DiffOp::Remove { orig_idx, .. } => {
                let removed = &segment.words[orig_idx];
                if let Some(last) = rebuilt.last_mut() {
                    if removed.end.is_some() {
                        last.end = removed.end;
                    }
                    last.score = None;
                } else {
                    let span = pending.get_or_insert_with(PendingSpan::default);
                    if span.start.is_none() {
                        span.start = removed.start;
                    }
                    if removed.end.is_some() {
                        span.end = removed.end;
                    }
                    if span.speaker.is_none() {
                        span.speaker = removed.speaker.clone();
                    }
                }
            }
            DiffOp::Add { word, .. } => {
                let added = match rebuilt.last_mut() {
                    Some(prev) if prev.valid_span().is_some() => {
                        let (start, end) = prev.valid_span().unwrap_or_default();
                        let mid = (start + end) / 2.0;
                        prev.end = Some(mid);
                        Word {
                            text: word,
                            start: Some(mid),
                            end: Some(end),
                            speaker: prev.speaker.clone(),
                            score: None,
                        }
                    }
                    _ => match pending.take() {
                        Some(span) => Word {
                            text: word,
                            start: span.start,
                            end: span.end,
                            speaker: span.speaker,
                            score: None,
                        },
                        // No timing anywhere to inherit: zero-duration
                        // sentinel at the segment start.
                        None => Word {
                            text: word,
                            start: Some(segment.start),
                            end: Some(segment.start),
                            speaker: None,
                            score: None,
                        },
                    },
                };
                rebuilt.push(added);
            }
        }
    }

    segment.words = rebuilt;
    segment.text = reconstruct_text(patched);
    ReconcileOutcome::Applied
}

/// Timing accumulated from removals that precede the first surviving word.
#[derive(Debug, Default)]
struct PendingSpan {
    start: Option<f64>,
    end: Option<f64>,
    speaker: Option<String>,
}
