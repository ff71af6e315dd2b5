//! Tokenization for timing-bearing word streams.
//!
//! These helpers preserve case and attached punctuation because their
//! output becomes `Word` records that must survive round-trips through the
//! reconciler. Lowercased comparison tokens (for edit metrics) are a
//! different concern and live with the metrics that use them.

/// Split on whitespace runs, preserving case and attached punctuation.
/// Empty tokens never appear in the output.
pub fn text_to_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Join word texts with single spaces and trim the result.
pub fn reconstruct_text<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
