//! Full-pipeline tests with a scripted LLM client.

use pipeline::{
    run, BoxFuture, Error, LlmClient, LlmError, PipelineConfig, Step, StepStatus,
};
use transcript::types::{Segment, Transcript, Word};

struct ScriptedLlm {
    reply: Result<String, String>,
}

impl ScriptedLlm {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: Err("provider timeout".to_string()),
        }
    }
}

impl LlmClient for ScriptedLlm {
    fn invoke<'a>(&'a self, _request_body: &'a str) -> BoxFuture<'a, Result<String, LlmError>> {
        let reply = self.reply.clone();
        Box::pin(async move { reply.map_err(LlmError::from) })
    }
}

fn word(text: &str, start: f64, end: f64, speaker: &str) -> Word {
    Word {
        text: text.to_string(),
        start: Some(start),
        end: Some(end),
        speaker: Some(speaker.to_string()),
        score: Some(0.9),
    }
}

fn segment(texts: &[&str], speaker: &str, base: f64) -> Segment {
    let step = 0.5;
    let words: Vec<Word> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| {
            word(
                t,
                base + i as f64 * step,
                base + (i + 1) as f64 * step,
                speaker,
            )
        })
        .collect();
    Segment {
        start: base,
        end: base + texts.len() as f64 * step,
        text: texts.join(" "),
        speaker: Some(speaker.to_string()),
        words,
    }
}

fn podcast_transcript() -> Transcript {
    Transcript {
        segments: vec![
            segment(
                &["Hello,", "welcome", "to", "the", "podcast."],
                "SPEAKER_00",
                0.0,
            ),
            segment(&["Thanks", "for", "having", "me!"], "SPEAKER_01", 2.5),
            segment(&["Today", "we", "talk", "about", "sage", "maker."], "SPEAKER_00", 4.5),
        ],
    }
}

fn full_config() -> PipelineConfig {
    PipelineConfig::from_str(
        r#"{
            "replacementRules": [
                { "type": "literal", "search": "sage maker", "replacement": "SageMaker" }
            ],
            "llmRefinement": {
                "bedrockInferenceProfileId": "profile-1"
            },
            "captions": { "highlightWords": false, "includeSpeakerNames": "always" }
        }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn replacement_llm_and_captions_compose() {
    let mut transcript = podcast_transcript();
    let llm = ScriptedLlm::replying(
        r#"{ "identifiedSpeakers": { "SPEAKER_00": "Luciano", "SPEAKER_01": "Eoin" },
             "updates": [] }"#,
    );

    let report = run(&mut transcript, &full_config(), Some(&llm))
        .await
        .unwrap();

    let replacement = report.replacement.unwrap();
    assert_eq!(replacement.segments_modified, 1);
    assert_eq!(
        replacement.replacement_counts.get("sage maker->SageMaker"),
        Some(&1)
    );

    let refinement = report.refinement.unwrap();
    assert_eq!(refinement.speakers_identified, 2);

    // The replaced product name survives refinement and normalization.
    let all_text: Vec<&str> = transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert!(all_text.iter().any(|t| t.contains("SageMaker")));

    // Speaker names flow into the captions.
    let vtt = report.captions.vtt.as_deref().unwrap();
    assert!(vtt.starts_with("WEBVTT\n"));
    assert!(vtt.contains("Luciano: "));
    assert!(vtt.contains("Eoin: Thanks for having me!"));

    let srt = report.captions.srt.as_deref().unwrap();
    assert!(srt.starts_with("1\n00:00:00,000 --> "));

    let json: serde_json::Value =
        serde_json::from_str(report.captions.json.as_deref().unwrap()).unwrap();
    assert_eq!(json["speakers"]["spk_0"], "Eoin");
    assert_eq!(json["speakers"]["spk_1"], "Luciano");

    // Every step ran.
    assert!(report
        .timings
        .iter()
        .all(|t| t.status == StepStatus::Success));
}

#[tokio::test]
async fn words_and_text_agree_after_every_step() {
    let mut transcript = podcast_transcript();
    let llm = ScriptedLlm::replying(
        r#"{ "identifiedSpeakers": {},
             "updates": [ { "idx": 1, "text": "Thanks for inviting me!" } ] }"#,
    );

    run(&mut transcript, &full_config(), Some(&llm))
        .await
        .unwrap();

    for segment in &transcript.segments {
        assert_eq!(segment.text, segment.words_text());
        let ends: Vec<f64> = segment.words.iter().filter_map(|w| w.end).collect();
        assert!(ends.windows(2).all(|p| p[0] <= p[1]));
    }
}

#[tokio::test]
async fn llm_failure_degrades_to_no_changes() {
    let mut transcript = podcast_transcript();
    let before = transcript.clone();
    let mut config = full_config();
    config.replacement_rules.clear();
    config.normalization.normalize = false;
    let llm = ScriptedLlm::failing();

    let report = run(&mut transcript, &config, Some(&llm)).await.unwrap();

    assert_eq!(transcript, before);
    let refinement = report.refinement.unwrap();
    assert_eq!(refinement.segments_updated, 0);
    assert_eq!(refinement.speakers_identified, 0);
    assert!(report.captions.vtt.is_some());
}

#[tokio::test]
async fn configured_llm_without_client_fails_fast() {
    let mut transcript = podcast_transcript();
    let before = transcript.clone();

    let err = run(&mut transcript, &full_config(), None).await;

    assert!(matches!(err, Err(Error::MissingLlmClient)));
    assert_eq!(transcript, before);
}

#[tokio::test]
async fn invalid_transcript_fails_before_any_step() {
    let mut transcript = podcast_transcript();
    transcript.segments[0].words[0].text = String::new();

    let err = run(&mut transcript, &PipelineConfig::default(), None).await;

    assert!(matches!(err, Err(Error::InvalidTranscript(_))));
}

#[tokio::test]
async fn invalid_rule_fails_before_any_step() {
    let mut transcript = podcast_transcript();
    let config = PipelineConfig::from_str(
        r#"{"replacementRules": [{"type": "regex", "search": "(", "replacement": "x"}]}"#,
    )
    .unwrap();

    let err = run(&mut transcript, &config, None).await;

    assert!(matches!(err, Err(Error::InvalidRule(_))));
}

#[tokio::test]
async fn steps_without_configuration_are_skipped() {
    let mut transcript = podcast_transcript();
    let config = PipelineConfig::from_str(
        r#"{ "normalization": { "normalize": false },
             "captions": { "generateVtt": false, "generateSrt": false, "generateJson": false } }"#,
    )
    .unwrap();

    let report = run(&mut transcript, &config, None).await.unwrap();

    assert!(report.replacement.is_none());
    assert!(report.refinement.is_none());
    assert!(report.normalization.is_none());
    assert_eq!(report.captions, pipeline::CaptionBundle::default());

    for timing in &report.timings {
        assert_eq!(timing.status, StepStatus::Skipped, "step {:?}", timing.step);
    }
    let steps: Vec<Step> = report.timings.iter().map(|t| t.step).collect();
    assert_eq!(
        steps,
        [
            Step::Replacement,
            Step::LlmRefinement,
            Step::Normalization,
            Step::Captions
        ]
    );
}

#[tokio::test]
async fn normalization_splits_long_segments_for_captions() {
    let texts: Vec<String> = (0..24).map(|i| format!("word{i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let mut transcript = Transcript {
        segments: vec![segment(&refs, "SPEAKER_00", 0.0)],
    };
    let config = PipelineConfig::from_str(r#"{"captions": {"highlightWords": false}}"#).unwrap();

    let report = run(&mut transcript, &config, None).await.unwrap();

    let normalization = report.normalization.unwrap();
    assert_eq!(normalization.segments_in, 1);
    assert!(normalization.segments_out > 1);
    assert_eq!(
        normalization.splits,
        normalization.segments_out - normalization.segments_in
    );
    assert!(transcript
        .segments
        .iter()
        .all(|s| s.words.len() <= 10 && s.text.chars().count() <= 48));
}
