#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration does not match the expected schema: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidRule(#[from] refine::replace::RuleError),

    #[error(transparent)]
    InvalidTranscript(#[from] transcript::types::ShapeError),

    #[error("llmRefinement is configured but no LLM client was provided")]
    MissingLlmClient,
}
