//! ElevenLabs TTS provider
//!
//! Calls `POST {base_url}/text-to-speech/{voice_id}` and receives raw MP3
//! bytes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::ElevenLabsConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

const TTS_MODEL: &str = "eleven_multilingual_v2";

/// ElevenLabs text-to-speech provider
#[derive(Debug, Clone)]
pub struct ElevenLabsTtsProvider {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsTtsProvider {
    /// Create a new ElevenLabs provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: ElevenLabsConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.config.base_url, self.config.voice_id
        )
    }
}

/// ElevenLabs synthesis request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

#[async_trait]
impl TextToSpeech for ElevenLabsTtsProvider {
    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text to synthesize is empty".to_string(),
            ));
        }

        // The multilingual model infers the language from the text itself,
        // so `language` only participates in logging here.
        let body = TtsRequest {
            text,
            model_id: TTS_MODEL,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.75,
            },
        };

        let response = self
            .client
            .post(self.tts_url())
            .header("xi-api-key", &self.config.api_key)
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

        let bytes = response.bytes().await.map_err(|e| {
            SpeechError::InvalidResponse(format!("Failed to read audio body: {e}"))
        })?;

        if bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Vendor returned an empty audio body".to_string(),
            ));
        }

        debug!(audio_size = bytes.len(), "Synthesis complete");

        Ok(AudioData::new(bytes.to_vec(), AudioFormat::Mp3))
    }

    fn engine_name(&self) -> &'static str {
        "elevenlabs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> ElevenLabsConfig {
        ElevenLabsConfig {
            api_key: "xi-test".to_string(),
            base_url,
            voice_id: "voice123".to_string(),
            timeout_ms: 2_000,
        }
    }

    #[tokio::test]
    async fn synthesizes_mp3_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/voice123"))
            .and(header("xi-api-key", "xi-test"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfb, 0x90]))
            .mount(&server)
            .await;

        let provider = ElevenLabsTtsProvider::new(config(server.uri())).unwrap();
        let audio = provider.synthesize("Hello there", "en").await.unwrap();

        assert_eq!(audio.as_bytes(), &[0xff, 0xfb, 0x90]);
        assert_eq!(audio.format(), AudioFormat::Mp3);
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let provider =
            ElevenLabsTtsProvider::new(config("http://localhost:9".to_string())).unwrap();
        let err = provider.synthesize("   ", "en").await.unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
    }

    #[tokio::test]
    async fn empty_audio_body_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/voice123"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let provider = ElevenLabsTtsProvider::new(config(server.uri())).unwrap();
        let err = provider.synthesize("hola", "es").await.unwrap_err();
        assert!(matches!(err, SpeechError::InvalidResponse(_)));
    }
}
