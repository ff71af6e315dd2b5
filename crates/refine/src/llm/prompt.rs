//! Request construction for the refinement invocation.

use transcript::types::Transcript;

use super::LlmRefinementConfig;

const INSTRUCTIONS: &str = "\
You are cleaning up a machine-generated transcript of a podcast episode.
Each line below has the form \"[index] [speaker] text\".

Fix ONLY machine transcription errors: misheard words, broken product or
technical names, and obvious word-boundary mistakes. Never rephrase a
sentence, never shorten it, and never correct the speaker's grammar or
style. Leave any line you are unsure about unchanged.

If the conversation reveals a speaker's real name, map that speaker label
to the name; otherwise map the label to itself.

Reply with JSON only, exactly in this shape:
{
  \"identifiedSpeakers\": { \"SPEAKER_00\": \"Name or SPEAKER_00\" },
  \"updates\": [ { \"idx\": 0, \"text\": \"full corrected text of that segment\" } ]
}

Include an entry in \"updates\" only for segments that need a correction,
and always return the complete corrected text for the segment.";

/// One line per segment: `[index] [speaker] words-text`. Unattributed
/// segments fall back to the `SPEAKER_00` label.
pub(super) fn numbered_lines(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            format!(
                "[{idx}] [{}] {}",
                segment.speaker.as_deref().unwrap_or("SPEAKER_00"),
                segment.words_text()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_prompt(config: &LlmRefinementConfig, transcript: &Transcript) -> String {
    let mut prompt = String::from(INSTRUCTIONS);

    if let Some(context) = config
        .additional_context
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        prompt.push_str("\n\nAdditional context about this episode:\n");
        prompt.push_str(context);
    }

    prompt.push_str("\n\nTranscript:\n");
    prompt.push_str(&numbered_lines(transcript));
    prompt
}

/// Serialize the complete invocation request. The injected client forwards
/// this body to whatever provider it fronts.
pub(super) fn build_request_body(config: &LlmRefinementConfig, transcript: &Transcript) -> String {
    serde_json::json!({
        "inferenceProfileId": config.bedrock_inference_profile_id,
        "max_tokens": config.model_config.max_tokens,
        "temperature": config.model_config.temperature,
        "messages": [
            { "role": "user", "content": build_prompt(config, transcript) }
        ],
    })
    .to_string()
}
