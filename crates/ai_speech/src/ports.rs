//! Port definitions for speech processing
//!
//! One capability per trait: adapters either transcribe or synthesize,
//! never both. The language is always an explicit argument because the
//! interpreter pipeline works on caller-declared language pairs.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Port for Speech-to-Text implementations
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text in the given language
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if transcription fails. Callers decide
    /// whether to fall back; adapters never retry.
    async fn transcribe(
        &self,
        audio: AudioData,
        language: &str,
    ) -> Result<Transcription, SpeechError>;

    /// Identity of the underlying engine, for logging
    fn engine_name(&self) -> &'static str;
}

/// Port for Text-to-Speech implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech for text in the given language
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails.
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError>;

    /// Identity of the underlying engine, for logging
    fn engine_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;

    struct MockStt;

    #[async_trait]
    impl SpeechToText for MockStt {
        async fn transcribe(
            &self,
            _audio: AudioData,
            language: &str,
        ) -> Result<Transcription, SpeechError> {
            Ok(Transcription::new("hola").with_language(language))
        }

        fn engine_name(&self) -> &'static str {
            "mock-stt"
        }
    }

    struct MockTts;

    #[async_trait]
    impl TextToSpeech for MockTts {
        async fn synthesize(&self, _text: &str, _language: &str) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(vec![0, 1, 2], AudioFormat::Mp3))
        }

        fn engine_name(&self) -> &'static str {
            "mock-tts"
        }
    }

    #[tokio::test]
    async fn stt_port_is_object_safe() {
        let stt: Box<dyn SpeechToText> = Box::new(MockStt);
        let audio = AudioData::new(vec![1], AudioFormat::Mp3);
        let result = stt.transcribe(audio, "es").await.unwrap();
        assert_eq!(result.text, "hola");
        assert_eq!(result.language.as_deref(), Some("es"));
    }

    #[tokio::test]
    async fn tts_port_is_object_safe() {
        let tts: Box<dyn TextToSpeech> = Box::new(MockTts);
        let audio = tts.synthesize("hello", "en").await.unwrap();
        assert!(!audio.is_empty());
    }
}
