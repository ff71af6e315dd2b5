//! Rule-based text substitution over segment word streams.
//!
//! Rules are compiled once per engine and applied in configuration order
//! to each segment's joined word text (never the possibly-stale `text`
//! field). A segment whose text actually changed is handed to the
//! reconciler so per-word timing survives the rewrite.

use std::collections::BTreeMap;

use transcript::reconcile::{reconcile_segment, ReconcileOutcome};
use transcript::types::Transcript;
use transcript::words::text_to_words;

/// A substitution rule from the pipeline configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReplacementRule {
    Literal { search: String, replacement: String },
    Regex { search: String, replacement: String },
}

impl ReplacementRule {
    /// Canonical identifier used for statistics, so tallies aggregate
    /// across runs without retaining rule objects.
    pub fn key(&self) -> String {
        match self {
            Self::Literal {
                search,
                replacement,
            } => format!("{search}->{replacement}"),
            Self::Regex {
                search,
                replacement,
            } => format!("r'{search}'->{replacement}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("replacement rule has an empty search pattern")]
    EmptySearch,

    #[error("invalid replacement pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug)]
enum CompiledRule {
    Literal {
        search: String,
        replacement: String,
        key: String,
    },
    Pattern {
        regex: regex::Regex,
        replacement: String,
        key: String,
    },
}

impl CompiledRule {
    fn key(&self) -> &str {
        match self {
            Self::Literal { key, .. } | Self::Pattern { key, .. } => key,
        }
    }

    fn count_matches(&self, text: &str) -> usize {
        match self {
            Self::Literal { search, .. } => text.matches(search.as_str()).count(),
            Self::Pattern { regex, .. } => regex.find_iter(text).count(),
        }
    }

    fn substitute(&self, text: &str) -> String {
        match self {
            Self::Literal {
                search,
                replacement,
                ..
            } => text.replace(search.as_str(), replacement),
            Self::Pattern {
                regex, replacement, ..
            } => regex.replace_all(text, replacement.as_str()).into_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceStats {
    pub segments_modified: usize,
    /// Approximate: the number of rule matches in segments whose text
    /// changed, not a per-word diff count.
    pub words_changed: usize,
    pub replacement_counts: BTreeMap<String, usize>,
}

/// Compiled rule set, valid for one pipeline invocation.
#[derive(Debug)]
pub struct ReplacementEngine {
    rules: Vec<CompiledRule>,
}

impl ReplacementEngine {
    pub fn new(rules: &[ReplacementRule]) -> Result<Self, RuleError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            compiled.push(match rule {
                ReplacementRule::Literal {
                    search,
                    replacement,
                } => {
                    if search.is_empty() {
                        return Err(RuleError::EmptySearch);
                    }
                    CompiledRule::Literal {
                        search: search.clone(),
                        replacement: replacement.clone(),
                        key: rule.key(),
                    }
                }
                ReplacementRule::Regex {
                    search,
                    replacement,
                } => CompiledRule::Pattern {
                    regex: regex::Regex::new(search).map_err(|source| RuleError::Pattern {
                        pattern: search.clone(),
                        source,
                    })?,
                    replacement: replacement.clone(),
                    key: rule.key(),
                },
            });
        }
        Ok(Self { rules: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to every segment, reconciling the segments whose
    /// text changed. Segments are independent; rule order matters, segment
    /// order does not.
    pub fn apply(&self, transcript: &mut Transcript) -> ReplaceStats {
        let mut stats = ReplaceStats::default();

        for segment in &mut transcript.segments {
            let source = segment.words_text();
            let mut patched = source.clone();
            let mut matches_in_segment = 0;

            for rule in &self.rules {
                let count = rule.count_matches(&patched);
                if count == 0 {
                    continue;
                }
                patched = rule.substitute(&patched);
                *stats
                    .replacement_counts
                    .entry(rule.key().to_string())
                    .or_default() += count;
                matches_in_segment += count;
            }

            if patched == source {
                continue;
            }

            if reconcile_segment(segment, &text_to_words(&patched)) != ReconcileOutcome::Applied {
                continue;
            }
            stats.segments_modified += 1;
            stats.words_changed += matches_in_segment;
        }

        if stats.segments_modified > 0 {
            tracing::debug!(
                segments_modified = stats.segments_modified,
                rules = self.rules.len(),
                "replacement_rules_applied"
            );
        }

        stats
    }
}
