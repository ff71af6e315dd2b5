//! Post-transcription refinement pipeline.
//!
//! Takes a raw speech-to-text transcript (segments with per-word timing,
//! speaker tags, confidence scores), applies rule-based replacements, an
//! LLM correction pass, and caption-sized normalization, then renders VTT,
//! SRT, and simplified-JSON captions. The transcript is mutated in place;
//! per-step statistics come back in a [`PipelineReport`].
//!
//! The LLM transport is an injected capability ([`LlmClient`]); the
//! pipeline itself never talks to a provider.

pub mod config;
pub mod error;
pub mod run;

pub use config::PipelineConfig;
pub use error::Error;
pub use run::{run, PipelineReport, Step, StepStatus, StepTiming};

pub use captions::{CaptionBundle, CaptionsConfig, HighlightStyle, SpeakerNameMode};
pub use refine::llm::{BoxFuture, LlmClient, LlmError, LlmRefinementConfig};
pub use refine::replace::ReplacementRule;
pub use refine::validate::SuggestionValidationConfig;
pub use transcript::normalize::NormalizationConfig;
pub use transcript::types::{Segment, Transcript, Word};
