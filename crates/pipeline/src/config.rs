//! Pipeline configuration schema.
//!
//! Configuration arrives as an external JSON document (camelCase keys,
//! most sections optional). Deserialization is the schema layer: defaults
//! come from each section's `Default` impl, the rule union is tag-
//! discriminated, and anything that does not fit the shape fails fast at
//! the boundary. Past this point the core trusts the parsed config.

use captions::CaptionsConfig;
use refine::llm::LlmRefinementConfig;
use refine::replace::ReplacementRule;
use transcript::normalize::NormalizationConfig;

use crate::error::Error;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Settings for the speech-to-text worker that produces the raw
    /// transcript. Carried through untouched; the refinement core never
    /// reads them.
    pub transcription: serde_json::Value,
    pub replacement_rules: Vec<ReplacementRule>,
    pub llm_refinement: Option<LlmRefinementConfig>,
    pub normalization: NormalizationConfig,
    pub captions: CaptionsConfig,
}

impl PipelineConfig {
    pub fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_str(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }
}
