//! Step ordering and the output report.
//!
//! Replacement, LLM refinement, and normalization run in that order, each
//! mutating the transcript in place; the caption renderers then read the
//! final value. Each step's wall time is recorded even when it degrades to
//! a no-op, and steps whose configuration turns them off are recorded as
//! skipped.

use std::time::Instant;

use captions::CaptionBundle;
use refine::llm::{refine_transcript, LlmClient, RefinementStats};
use refine::replace::{ReplaceStats, ReplacementEngine};
use transcript::normalize::{normalize, NormalizeStats};
use transcript::types::Transcript;

use crate::config::PipelineConfig;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Replacement,
    LlmRefinement,
    Normalization,
    Captions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Success,
    Skipped,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTiming {
    pub step: Step,
    pub status: StepStatus,
    pub duration_ms: u64,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub replacement: Option<ReplaceStats>,
    pub refinement: Option<RefinementStats>,
    pub normalization: Option<NormalizeStats>,
    pub captions: CaptionBundle,
    pub timings: Vec<StepTiming>,
}

/// Refine `transcript` in place and render its captions.
///
/// Fails fast (before touching the transcript) on shape errors, rule
/// compilation errors, and a configured refinement step without a client.
/// After that nothing here returns an error: per-suggestion rejections and
/// LLM transport problems degrade into report entries.
pub async fn run(
    transcript: &mut Transcript,
    config: &PipelineConfig,
    llm: Option<&dyn LlmClient>,
) -> Result<PipelineReport, Error> {
    transcript.validate()?;
    let engine = ReplacementEngine::new(&config.replacement_rules)?;
    if config.llm_refinement.is_some() && llm.is_none() {
        return Err(Error::MissingLlmClient);
    }

    let mut timings = Vec::with_capacity(4);

    let replacement = if engine.is_empty() {
        timings.push(StepTiming {
            step: Step::Replacement,
            status: StepStatus::Skipped,
            duration_ms: 0,
        });
        None
    } else {
        let started = Instant::now();
        let stats = engine.apply(transcript);
        timings.push(StepTiming {
            step: Step::Replacement,
            status: StepStatus::Success,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        Some(stats)
    };

    let refinement = match (&config.llm_refinement, llm) {
        (Some(llm_config), Some(client)) => {
            let started = Instant::now();
            let stats = refine_transcript(transcript, llm_config, client).await;
            timings.push(StepTiming {
                step: Step::LlmRefinement,
                status: StepStatus::Success,
                duration_ms: started.elapsed().as_millis() as u64,
            });
            Some(stats)
        }
        _ => {
            timings.push(StepTiming {
                step: Step::LlmRefinement,
                status: StepStatus::Skipped,
                duration_ms: 0,
            });
            None
        }
    };

    let normalization = if config.normalization.normalize {
        let started = Instant::now();
        let stats = normalize(transcript, &config.normalization);
        timings.push(StepTiming {
            step: Step::Normalization,
            status: StepStatus::Success,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        Some(stats)
    } else {
        timings.push(StepTiming {
            step: Step::Normalization,
            status: StepStatus::Skipped,
            duration_ms: 0,
        });
        None
    };

    let captions_config = &config.captions;
    let any_captions = captions_config.generate_vtt
        || captions_config.generate_srt
        || captions_config.generate_json;
    let captions = if any_captions {
        let started = Instant::now();
        let bundle = captions::generate(transcript, captions_config);
        timings.push(StepTiming {
            step: Step::Captions,
            status: StepStatus::Success,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        bundle
    } else {
        timings.push(StepTiming {
            step: Step::Captions,
            status: StepStatus::Skipped,
            duration_ms: 0,
        });
        CaptionBundle::default()
    };

    tracing::debug!(
        segments = transcript.segments.len(),
        steps = timings.len(),
        "pipeline_complete"
    );

    Ok(PipelineReport {
        replacement,
        refinement,
        normalization,
        captions,
        timings,
    })
}
