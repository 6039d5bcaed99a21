//! Provider credential configuration.

use ai_llm::ChatProviderConfig;
use ai_speech::config::{DeepgramConfig, ElevenLabsConfig, GoogleTtsConfig, WhisperConfig};
use serde::{Deserialize, Serialize};

/// Credentials and endpoints for every configured provider
///
/// All six engines must be configured: the fallback path assumes the
/// premium stack is always reachable in configuration terms, and the
/// challenger stack cannot be routed to without credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// OpenAI Whisper (STT, premium)
    pub whisper: WhisperConfig,
    /// Deepgram (STT, challenger)
    pub deepgram: DeepgramConfig,
    /// OpenAI chat (LLM, premium)
    pub openai: ChatProviderConfig,
    /// DeepSeek chat (LLM, challenger)
    pub deepseek: ChatProviderConfig,
    /// ElevenLabs (TTS, premium)
    pub elevenlabs: ElevenLabsConfig,
    /// Google Cloud TTS (TTS, challenger)
    pub google_tts: GoogleTtsConfig,
}

impl ProvidersConfig {
    /// Validate every provider section
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, prefixed with the section name.
    pub fn validate(&self) -> Result<(), String> {
        self.whisper
            .validate()
            .map_err(|e| format!("providers.whisper: {e}"))?;
        self.deepgram
            .validate()
            .map_err(|e| format!("providers.deepgram: {e}"))?;
        self.openai
            .validate()
            .map_err(|e| format!("providers.openai: {e}"))?;
        self.deepseek
            .validate()
            .map_err(|e| format!("providers.deepseek: {e}"))?;
        self.elevenlabs
            .validate()
            .map_err(|e| format!("providers.elevenlabs: {e}"))?;
        self.google_tts
            .validate()
            .map_err(|e| format!("providers.google_tts: {e}"))?;
        Ok(())
    }
}
