//! LLM-driven transcript refinement.
//!
//! The transcript is serialized as numbered speaker-tagged lines, sent
//! through an injected [`LlmClient`], and the structured reply is applied
//! back: a speaker-label remap plus per-segment rewrites, each gated by
//! the suggestion validator and materialized through the reconciler.
//!
//! Transport failures and unparseable replies are non-fatal: the step
//! applies nothing, logs a warning, and still reports its latency. There
//! is no partial application beyond the per-suggestion granularity the
//! stats record.

mod prompt;
mod response;

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use transcript::reconcile::{reconcile_segment, ReconcileOutcome};
use transcript::types::Transcript;
use transcript::words::text_to_words;

use crate::validate::{validate_suggestion, RejectReason, SuggestionValidationConfig};

pub type LlmError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Capability to invoke a language model.
///
/// The implementation owns transport, credentials, and retries; the
/// refinement step only builds the request body and consumes the raw reply
/// text. The trait is object-safe via the explicit `BoxFuture` return
/// type, so tests inject scripted fakes as `&dyn LlmClient`.
pub trait LlmClient: Send + Sync {
    fn invoke<'a>(&'a self, request_body: &'a str) -> BoxFuture<'a, Result<String, LlmError>>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmRefinementConfig {
    pub bedrock_inference_profile_id: String,
    #[serde(default)]
    pub additional_context: Option<String>,
    #[serde(default)]
    pub model_config: ModelConfig,
    #[serde(default)]
    pub suggestion_validation: SuggestionValidationConfig,
}

/// Passed through to the model invocation verbatim; the refinement step
/// does not interpret these beyond serialization.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedUpdate {
    pub original_text: String,
    pub corrected_text: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoredSuggestion {
    pub idx: usize,
    pub original_text: String,
    pub corrected_text: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementStats {
    pub segments_processed: usize,
    pub segments_updated: usize,
    pub speakers_identified: usize,
    pub speaker_map: BTreeMap<String, String>,
    pub applied_updates: Vec<AppliedUpdate>,
    pub ignored_suggestions: Vec<IgnoredSuggestion>,
    pub llm_response_time_ms: u64,
}

/// Run one refinement pass over the whole transcript.
pub async fn refine_transcript(
    transcript: &mut Transcript,
    config: &LlmRefinementConfig,
    llm: &dyn LlmClient,
) -> RefinementStats {
    let mut stats = RefinementStats {
        segments_processed: transcript.segments.len(),
        ..Default::default()
    };

    let request_body = prompt::build_request_body(config, transcript);

    let started = Instant::now();
    let reply = llm.invoke(&request_body).await;
    stats.llm_response_time_ms = started.elapsed().as_millis() as u64;

    let reply = match reply {
        Ok(reply) => reply,
        Err(error) => {
            tracing::warn!(error = %error, "llm_invocation_failed");
            return stats;
        }
    };

    let Some(parsed) = response::parse_reply(&reply) else {
        tracing::warn!(reply_len = reply.len(), "llm_reply_not_parseable");
        return stats;
    };

    apply_speaker_map(transcript, &parsed.identified_speakers, &mut stats);

    for update in &parsed.updates {
        let Some(segment) = transcript.segments.get_mut(update.idx) else {
            tracing::warn!(idx = update.idx, "llm_update_index_out_of_range");
            continue;
        };

        let original_text = segment.words_text();
        if update.text == original_text {
            stats.ignored_suggestions.push(IgnoredSuggestion {
                idx: update.idx,
                original_text,
                corrected_text: update.text.clone(),
                reason: RejectReason::NoChange,
            });
            continue;
        }

        if let Err(reason) =
            validate_suggestion(&original_text, &update.text, &config.suggestion_validation)
        {
            stats.ignored_suggestions.push(IgnoredSuggestion {
                idx: update.idx,
                original_text,
                corrected_text: update.text.clone(),
                reason,
            });
            continue;
        }

        if reconcile_segment(segment, &text_to_words(&update.text)) != ReconcileOutcome::Applied {
            continue;
        }
        stats.segments_updated += 1;
        stats.applied_updates.push(AppliedUpdate {
            original_text,
            corrected_text: update.text.clone(),
        });
    }

    stats
}

/// Rewrite segment and word speaker labels per the model's identification.
/// Identity mappings ("SPEAKER_00" stayed "SPEAKER_00") are not applied
/// and do not count as identified.
fn apply_speaker_map(
    transcript: &mut Transcript,
    identified: &BTreeMap<String, String>,
    stats: &mut RefinementStats,
) {
    for (label, name) in identified {
        if name.is_empty() || name == label {
            continue;
        }

        for segment in &mut transcript.segments {
            if segment.speaker.as_deref() == Some(label.as_str()) {
                segment.speaker = Some(name.clone());
            }
            for word in &mut segment.words {
                if word.speaker.as_deref() == Some(label.as_str()) {
                    word.speaker = Some(name.clone());
                }
            }
        }

        stats.speaker_map.insert(label.clone(), name.clone());
        stats.speakers_identified += 1;
    }
}
