//! Rewrite sources for the caption refinement pipeline: rule-based text
//! substitution, LLM-suggested corrections gated by validation, and the
//! edit metrics both are judged with. Every accepted rewrite flows through
//! `transcript::reconcile` so per-word timing survives.

pub mod distance;
pub mod llm;
pub mod replace;
pub mod validate;

pub use llm::{
    refine_transcript, AppliedUpdate, BoxFuture, IgnoredSuggestion, LlmClient, LlmError,
    LlmRefinementConfig, ModelConfig, RefinementStats,
};
pub use replace::{ReplaceStats, ReplacementEngine, ReplacementRule, RuleError};
pub use validate::{
    validate_suggestion, RejectReason, SuggestionValidationConfig,
};
