//! Deepgram STT provider
//!
//! Calls `POST {base_url}/listen` with the raw audio body and the nova-2
//! model, and extracts the first alternative's transcript.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::DeepgramConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::{AudioData, Transcription};

const STT_MODEL: &str = "nova-2";

/// Deepgram speech-to-text provider
#[derive(Debug, Clone)]
pub struct DeepgramSttProvider {
    client: Client,
    config: DeepgramConfig,
}

impl DeepgramSttProvider {
    /// Create a new Deepgram provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: DeepgramConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn listen_url(&self) -> String {
        format!("{}/listen", self.config.base_url)
    }
}

/// Deepgram prerecorded response (only the fields we read)
#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
}

#[async_trait]
impl SpeechToText for DeepgramSttProvider {
    #[instrument(skip(self, audio), fields(audio_size = audio.size_bytes(), language = %language))]
    async fn transcribe(
        &self,
        audio: AudioData,
        language: &str,
    ) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        let mime_type = audio.format().mime_type();

        let response = self
            .client
            .post(self.listen_url())
            .query(&[
                ("model", STT_MODEL),
                ("language", language),
                ("smart_format", "true"),
            ])
            .header("Authorization", format!("Token {}", self.config.api_key))
            .header("Content-Type", mime_type)
            .body(audio.into_data())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(SpeechError::RateLimited);
            }
            return Err(SpeechError::TranscriptionFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let listen: ListenResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let transcript = listen
            .results
            .channels
            .first()
            .and_then(|c| c.alternatives.first())
            .map(|a| a.transcript.clone())
            .ok_or_else(|| {
                SpeechError::InvalidResponse("Response carried no alternatives".to_string())
            })?;

        debug!(text_len = transcript.len(), "Transcription complete");

        Ok(Transcription::new(transcript).with_language(language))
    }

    fn engine_name(&self) -> &'static str {
        "deepgram"
    }
}
