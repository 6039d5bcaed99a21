//! Adapters bridging the speech vendor clients onto the application ports
//!
//! The vendor clients speak raw strings and `AudioData`; the application
//! speaks value objects and `ApplicationError`. These wrappers translate
//! between the two without adding behavior.

use ai_speech::ports::{SpeechToText, TextToSpeech};
use ai_speech::types::{AudioData, AudioFormat};
use ai_speech::SpeechError;
use application::error::ApplicationError;
use application::ports::{SttPort, TtsPort};
use async_trait::async_trait;
use domain::LanguageCode;

/// Wraps a vendor STT client as an `SttPort`
#[derive(Debug)]
pub struct SpeechToTextAdapter<P> {
    provider: P,
}

impl<P> SpeechToTextAdapter<P> {
    /// Wrap a vendor client
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: SpeechToText> SttPort for SpeechToTextAdapter<P> {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        language: LanguageCode,
    ) -> Result<String, ApplicationError> {
        let format = detect_format(&audio);
        let transcription = self
            .provider
            .transcribe(AudioData::new(audio, format), language.as_str())
            .await
            .map_err(map_speech_error)?;
        Ok(transcription.text)
    }
}

/// Wraps a vendor TTS client as a `TtsPort`
#[derive(Debug)]
pub struct TextToSpeechAdapter<P> {
    provider: P,
}

impl<P> TextToSpeechAdapter<P> {
    /// Wrap a vendor client
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: TextToSpeech> TtsPort for TextToSpeechAdapter<P> {
    async fn synthesize(
        &self,
        text: String,
        language: LanguageCode,
    ) -> Result<Vec<u8>, ApplicationError> {
        let audio = self
            .provider
            .synthesize(&text, language.as_str())
            .await
            .map_err(map_speech_error)?;
        Ok(audio.into_data())
    }
}

/// Sniff the container format from the payload's magic bytes
///
/// Uploads do not carry a trustworthy content type, and the vendors only
/// need the format for the upload filename. Defaults to MP3.
fn detect_format(audio: &[u8]) -> AudioFormat {
    if audio.len() >= 12 && &audio[4..8] == b"ftyp" {
        AudioFormat::M4a
    } else if audio.len() >= 4 && &audio[0..4] == b"RIFF" {
        AudioFormat::Wav
    } else {
        AudioFormat::Mp3
    }
}

fn map_speech_error(error: SpeechError) -> ApplicationError {
    match error {
        SpeechError::RateLimited => ApplicationError::RateLimited,
        SpeechError::InvalidAudio(message) => ApplicationError::InvalidInput(message),
        SpeechError::Configuration(message) => ApplicationError::Configuration(message),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}
