//! Accept or reject a proposed rewrite of a segment's text.
//!
//! The point is to let the model fix machine-transcription mistakes while
//! refusing wholesale rephrasings that would desynchronize captions from
//! the audio. Ratios are LCS-based rather than positional: collapsing
//! "lambda land" into "LambdaLith" counts as two removes and one add, not
//! a cascade of substitutions.

use transcript::diff::{compute_diff, compute_lcs};

use crate::distance::{normalized_edit_distance, split_words};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionValidationConfig {
    pub enabled: bool,
    pub max_word_change_ratio: f64,
    pub max_normalized_edit_distance: f64,
    pub max_consecutive_changes: usize,
    /// Below this many original words only the consecutive-changes check
    /// applies; short segments legitimately need proportionally larger
    /// edits.
    pub min_words_for_ratio_check: usize,
}

impl Default for SuggestionValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_word_change_ratio: 0.4,
            max_normalized_edit_distance: 0.5,
            max_consecutive_changes: 3,
            min_words_for_ratio_check: 5,
        }
    }
}

/// Why a suggestion was rejected, in check-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    NoChange,
    WordChangeRatio,
    EditDistance,
    ConsecutiveChanges,
}

/// Fraction of words the rewrite touches: `(max(|o|,|c|) - |lcs|) / max`.
pub fn word_change_ratio(original: &str, corrected: &str) -> f64 {
    let original_words = split_words(original);
    let corrected_words = split_words(corrected);
    let longest = original_words.len().max(corrected_words.len());
    if longest == 0 {
        return 0.0;
    }
    let common = compute_lcs(&original_words, &corrected_words).len();
    (longest - common) as f64 / longest as f64
}

/// Longest run of consecutive non-KEEP operations in the word diff.
pub fn max_consecutive_changes(original: &str, corrected: &str) -> usize {
    let ops = compute_diff(&split_words(original), &split_words(corrected));

    let mut longest = 0;
    let mut run = 0;
    for op in &ops {
        if op.is_keep() {
            run = 0;
        } else {
            run += 1;
            longest = longest.max(run);
        }
    }
    longest
}

/// Validate a proposed rewrite against the configured thresholds.
pub fn validate_suggestion(
    original: &str,
    corrected: &str,
    config: &SuggestionValidationConfig,
) -> Result<(), RejectReason> {
    if !config.enabled {
        return Ok(());
    }

    if original == corrected {
        return Err(RejectReason::NoChange);
    }

    let consecutive = max_consecutive_changes(original, corrected);

    if split_words(original).len() < config.min_words_for_ratio_check {
        if consecutive > config.max_consecutive_changes {
            return Err(RejectReason::ConsecutiveChanges);
        }
        return Ok(());
    }

    if word_change_ratio(original, corrected) > config.max_word_change_ratio {
        return Err(RejectReason::WordChangeRatio);
    }
    if normalized_edit_distance(original, corrected) > config.max_normalized_edit_distance {
        return Err(RejectReason::EditDistance);
    }
    if consecutive > config.max_consecutive_changes {
        return Err(RejectReason::ConsecutiveChanges);
    }

    Ok(())
}
