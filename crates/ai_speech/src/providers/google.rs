//! Google Cloud TTS provider
//!
//! Calls `POST {base_url}/text:synthesize` and decodes the base64 audio
//! content. Language codes are mapped to Neural2 voices.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GoogleTtsConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

/// Google Cloud text-to-speech provider
#[derive(Debug, Clone)]
pub struct GoogleTtsProvider {
    client: Client,
    config: GoogleTtsConfig,
}

impl GoogleTtsProvider {
    /// Create a new Google TTS provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: GoogleTtsConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/text:synthesize", self.config.base_url)
    }

    /// Map a two-letter language code to a Neural2 voice
    fn voice_for_language(language: &str) -> VoiceSelection<'_> {
        match language {
            "es" => VoiceSelection {
                language_code: "es-US",
                name: "es-US-Neural2-A",
            },
            "de" => VoiceSelection {
                language_code: "de-DE",
                name: "de-DE-Neural2-B",
            },
            "fr" => VoiceSelection {
                language_code: "fr-FR",
                name: "fr-FR-Neural2-A",
            },
            _ => VoiceSelection {
                language_code: "en-US",
                name: "en-US-Neural2-J",
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: TextInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[async_trait]
impl TextToSpeech for GoogleTtsProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text to synthesize is empty".to_string(),
            ));
        }

        let body = SynthesizeRequest {
            input: TextInput { text },
            voice: Self::voice_for_language(language),
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        let response = self
            .client
            .post(self.synthesize_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(SpeechError::RateLimited);
            }
            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let synth: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let audio_bytes = BASE64.decode(synth.audio_content).map_err(|e| {
            SpeechError::InvalidResponse(format!("Audio content is not valid base64: {e}"))
        })?;

        debug!(audio_size = audio_bytes.len(), "Synthesis complete");

        Ok(AudioData::new(audio_bytes, AudioFormat::Mp3))
    }

    fn engine_name(&self) -> &'static str {
        "google-neural"
    }
}
