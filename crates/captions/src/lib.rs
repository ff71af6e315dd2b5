//! Caption rendering: WebVTT, SubRip, and a simplified JSON form.
//!
//! Renderers are pure functions of `(transcript, config)`; they clone what
//! they need and never mutate the transcript, so the caller is free to run
//! them in parallel.

mod cue;
mod json;
mod srt;
mod time;
mod vtt;

use transcript::types::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightStyle {
    Underline,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeakerNameMode {
    Never,
    Always,
    WhenChanges,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptionsConfig {
    pub generate_vtt: bool,
    pub generate_srt: bool,
    pub generate_json: bool,
    pub highlight_words: bool,
    pub highlight_with: HighlightStyle,
    pub include_speaker_names: SpeakerNameMode,
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            generate_vtt: true,
            generate_srt: true,
            generate_json: true,
            highlight_words: true,
            highlight_with: HighlightStyle::Underline,
            include_speaker_names: SpeakerNameMode::WhenChanges,
        }
    }
}

/// The rendered caption strings, one per enabled output.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct CaptionBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vtt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
}

/// Render every enabled caption format.
pub fn generate(transcript: &Transcript, config: &CaptionsConfig) -> CaptionBundle {
    CaptionBundle {
        vtt: config
            .generate_vtt
            .then(|| vtt::render_vtt(transcript, config)),
        srt: config
            .generate_srt
            .then(|| srt::render_srt(transcript, config)),
        json: config.generate_json.then(|| json::render_json(transcript)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transcript::types::Segment;

    fn transcript() -> Transcript {
        Transcript {
            segments: vec![Segment {
                start: 0.0,
                end: 1.0,
                text: "hello".to_string(),
                speaker: None,
                words: vec![],
            }],
        }
    }

    #[test]
    fn flags_control_which_outputs_exist() {
        let config = CaptionsConfig {
            generate_vtt: true,
            generate_srt: false,
            generate_json: true,
            ..CaptionsConfig::default()
        };

        let bundle = generate(&transcript(), &config);

        assert!(bundle.vtt.is_some());
        assert!(bundle.srt.is_none());
        assert!(bundle.json.is_some());
    }

    #[test]
    fn generation_is_pure() {
        let t = transcript();
        let before = t.clone();
        let config = CaptionsConfig::default();

        let first = generate(&t, &config);
        let second = generate(&t, &config);

        assert_eq!(t, before);
        assert_eq!(first, second);
    }

    #[test]
    fn config_parses_from_camel_case_json() {
        let config: CaptionsConfig = serde_json::from_str(
            r#"{"generateVtt": false, "highlightWith": "bold",
                "includeSpeakerNames": "when-changes"}"#,
        )
        .unwrap();
        assert!(!config.generate_vtt);
        assert!(config.generate_srt);
        assert_eq!(config.highlight_with, HighlightStyle::Bold);
        assert_eq!(config.include_speaker_names, SpeakerNameMode::WhenChanges);
    }
}
