//! Word-level diffing between an original and a rewritten token stream.
//!
//! Matching is case-insensitive (tokens are compared lowercased) so that a
//! pure casing correction reads as a KEEP rather than a remove/add pair.
//! KEEP and ADD ops carry the *patched* surface form and REMOVE the
//! original, which lets the reconciler adopt corrected casing without a
//! separate pass.

/// Longest common subsequence between two token arrays, with the index of
/// each common token in both inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcs {
    pub tokens: Vec<String>,
    pub a_indices: Vec<usize>,
    pub b_indices: Vec<usize>,
}

impl Lcs {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Standard DP longest common subsequence with backtrack.
///
/// Backtrack ties are broken deterministically: move up (drop a token of
/// `a`) only when `dp[i-1][j] > dp[i][j-1]`, otherwise move left. The
/// reconciler depends on which side owns a difference, so this order is
/// part of the contract.
pub fn compute_lcs(a: &[String], b: &[String]) -> Lcs {
    let (la, lb) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; lb + 1]; la + 1];

    for i in 1..=la {
        for j in 1..=lb {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut tokens = Vec::new();
    let mut a_indices = Vec::new();
    let mut b_indices = Vec::new();
    let (mut i, mut j) = (la, lb);

    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            tokens.push(a[i - 1].clone());
            a_indices.push(i - 1);
            b_indices.push(j - 1);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    tokens.reverse();
    a_indices.reverse();
    b_indices.reverse();

    Lcs {
        tokens,
        a_indices,
        b_indices,
    }
}

/// One step of the original-to-patched rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    /// The word survives. `word` carries the patched surface form, which may
    /// differ from the original in casing or punctuation.
    Keep {
        orig_idx: usize,
        patch_idx: usize,
        word: String,
    },
    Remove {
        orig_idx: usize,
        word: String,
    },
    Add {
        patch_idx: usize,
        word: String,
    },
}

impl DiffOp {
    pub fn is_keep(&self) -> bool {
        matches!(self, DiffOp::Keep { .. })
    }
}

/// Emit the rewrite as a single left-to-right walk consuming both arrays.
///
/// At each step: if both cursors sit on the next common token, emit KEEP
/// and advance both; else if the original cursor is on a non-kept position,
/// emit REMOVE; else emit ADD. Residual tokens past the last common token
/// drain as REMOVE/ADD, so the walk never stalls.
pub fn compute_diff(original: &[String], patched: &[String]) -> Vec<DiffOp> {
    let orig_lower: Vec<String> = original.iter().map(|w| w.to_lowercase()).collect();
    let patch_lower: Vec<String> = patched.iter().map(|w| w.to_lowercase()).collect();
    let lcs = compute_lcs(&orig_lower, &patch_lower);

    let mut ops = Vec::with_capacity(original.len().max(patched.len()));
    let (mut i, mut j, mut k) = (0usize, 0usize, 0usize);

    while i < original.len() || j < patched.len() {
        let at_common =
            k < lcs.len() && i == lcs.a_indices[k] && j == lcs.b_indices[k];

        if at_common {
            ops.push(DiffOp::Keep {
                orig_idx: i,
                patch_idx: j,
                word: patched[j].clone(),
            });
            i += 1;
            j += 1;
            k += 1;
        } else if i < original.len() && (k >= lcs.len() || i != lcs.a_indices[k]) {
            ops.push(DiffOp::Remove {
                orig_idx: i,
                word: original[i].clone(),
            });
            i += 1;
        } else {
            ops.push(DiffOp::Add {
                patch_idx: j,
                word: patched[j].clone(),
            });
            j += 1;
        }
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn lcs_of_identical_inputs_is_everything() {
        let a = toks("one two three");
        let lcs = compute_lcs(&a, &a);
        assert_eq!(lcs.tokens, a);
        assert_eq!(lcs.a_indices, [0, 1, 2]);
        assert_eq!(lcs.b_indices, [0, 1, 2]);
    }

    #[test]
    fn lcs_of_disjoint_inputs_is_empty() {
        let lcs = compute_lcs(&toks("a b"), &toks("c d"));
        assert!(lcs.is_empty());
    }

    #[test]
    fn lcs_skips_over_replaced_middle() {
        let lcs = compute_lcs(&toks("set the um main execution"), &toks("set the min execution"));
        assert_eq!(lcs.tokens, toks("set the execution"));
        assert_eq!(lcs.a_indices, [0, 1, 4]);
        assert_eq!(lcs.b_indices, [0, 1, 3]);
    }

    #[test]
    fn lcs_with_duplicate_tokens_is_deterministic() {
        // The tie-break (prefer left on equality) pins which "a" survives.
        let lcs = compute_lcs(&toks("a b a"), &toks("a a"));
        assert_eq!(lcs.tokens, toks("a a"));
        assert_eq!(lcs.a_indices, [0, 2]);
        assert_eq!(lcs.b_indices, [0, 1]);
    }

    #[test]
    fn diff_emits_removes_before_adds_at_a_mismatch() {
        let ops = compute_diff(&toks("sage maker rocks"), &toks("SageMaker rocks"));
        assert_eq!(
            ops,
            vec![
                DiffOp::Remove { orig_idx: 0, word: "sage".into() },
                DiffOp::Remove { orig_idx: 1, word: "maker".into() },
                DiffOp::Add { patch_idx: 0, word: "SageMaker".into() },
                DiffOp::Keep { orig_idx: 2, patch_idx: 1, word: "rocks".into() },
            ]
        );
    }

    #[test]
    fn diff_matches_case_insensitively_and_keeps_patched_surface() {
        let ops = compute_diff(&toks("hello world"), &toks("Hello world"));
        assert_eq!(
            ops,
            vec![
                DiffOp::Keep { orig_idx: 0, patch_idx: 0, word: "Hello".into() },
                DiffOp::Keep { orig_idx: 1, patch_idx: 1, word: "world".into() },
            ]
        );
    }

    #[test]
    fn diff_drains_residual_tails() {
        let ops = compute_diff(&toks("a b c"), &toks("a"));
        assert_eq!(
            ops,
            vec![
                DiffOp::Keep { orig_idx: 0, patch_idx: 0, word: "a".into() },
                DiffOp::Remove { orig_idx: 1, word: "b".into() },
                DiffOp::Remove { orig_idx: 2, word: "c".into() },
            ]
        );

        let ops = compute_diff(&toks("a"), &toks("a b c"));
        assert_eq!(
            ops,
            vec![
                DiffOp::Keep { orig_idx: 0, patch_idx: 0, word: "a".into() },
                DiffOp::Add { patch_idx: 1, word: "b".into() },
                DiffOp::Add { patch_idx: 2, word: "c".into() },
            ]
        );
    }

    #[test]
    fn diff_consumes_both_empty_inputs() {
        assert!(compute_diff(&[], &[]).is_empty());
    }

    #[test]
    fn diff_covers_every_index_exactly_once() {
        let original = toks("so default in lambda, that would be a one-to-one ratio");
        let patched = toks("so you can have up to 64 concurrent invocations");
        let ops = compute_diff(&original, &patched);

        let removed_or_kept: Vec<usize> = ops
            .iter()
            .filter_map(|op| match op {
                DiffOp::Keep { orig_idx, .. } | DiffOp::Remove { orig_idx, .. } => Some(*orig_idx),
                DiffOp::Add { .. } => None,
            })
            .collect();
        let added_or_kept: Vec<usize> = ops
            .iter()
            .filter_map(|op| match op {
                DiffOp::Keep { patch_idx, .. } | DiffOp::Add { patch_idx, .. } => Some(*patch_idx),
                DiffOp::Remove { .. } => None,
            })
            .collect();

        assert_eq!(removed_or_kept, (0..original.len()).collect::<Vec<_>>());
        assert_eq!(added_or_kept, (0..patched.len()).collect::<Vec<_>>());
    }
}
