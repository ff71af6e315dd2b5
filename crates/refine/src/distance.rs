//! Edit-distance metrics over suggestion texts.
//!
//! These operate on lowercased comparison tokens and full strings; they
//! never touch the timing-bearing word stream (that tokenization lives in
//! `transcript::words`).

/// Character-level Levenshtein distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Levenshtein normalized by the longer input's length, in `[0, 1]`.
/// Two empty strings are identical (0); one empty string is a full
/// rewrite (1).
pub fn normalized_edit_distance(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / longest as f64
}

/// Lowercase and split on whitespace runs, dropping empty tokens. For
/// comparison metrics only.
pub fn split_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(normalized_edit_distance("same text", "same text"), 0.0);
    }

    #[test]
    fn one_empty_side_is_a_full_rewrite() {
        assert_eq!(normalized_edit_distance("", "anything"), 1.0);
        assert_eq!(normalized_edit_distance("anything", ""), 1.0);
    }

    #[test]
    fn both_empty_is_zero() {
        assert_eq!(normalized_edit_distance("", ""), 0.0);
    }

    #[test]
    fn distance_stays_in_unit_interval() {
        let cases = [
            ("sage maker rocks", "SageMaker rocks"),
            ("kitten", "sitting"),
            ("a", "completely different"),
        ];
        for (a, b) in cases {
            let d = normalized_edit_distance(a, b);
            assert!((0.0..=1.0).contains(&d), "{a:?} vs {b:?} gave {d}");
        }
    }

    #[test]
    fn levenshtein_counts_character_edits() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn split_words_lowercases_and_collapses_whitespace() {
        assert_eq!(
            split_words("Sage  Maker\tRocks"),
            ["sage", "maker", "rocks"]
        );
        assert!(split_words("  \n ").is_empty());
    }
}
