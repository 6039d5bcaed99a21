//! Speech adapter configuration
//!
//! One config struct per vendor. Base URLs are overridable so tests can
//! point adapters at a local mock server.

use serde::{Deserialize, Serialize};

/// Default per-call timeout for the slowest network call
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_deepgram_base_url() -> String {
    "https://api.deepgram.com/v1".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_google_tts_base_url() -> String {
    "https://texttospeech.googleapis.com/v1".to_string()
}

fn default_elevenlabs_voice() -> String {
    // Default multilingual voice ("Rachel")
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

/// OpenAI Whisper STT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperConfig {
    /// API key
    pub api_key: String,
    /// Base URL for the OpenAI API
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl WhisperConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("OpenAI API key is required for Whisper".to_string());
        }
        Ok(())
    }
}

/// Deepgram STT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepgramConfig {
    /// API key
    pub api_key: String,
    /// Base URL for the Deepgram API
    #[serde(default = "default_deepgram_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl DeepgramConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("Deepgram API key is required".to_string());
        }
        Ok(())
    }
}

/// ElevenLabs TTS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    /// API key (`xi-api-key` header)
    pub api_key: String,
    /// Base URL for the ElevenLabs API
    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,
    /// Voice id used for synthesis
    #[serde(default = "default_elevenlabs_voice")]
    pub voice_id: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ElevenLabsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("ElevenLabs API key is required".to_string());
        }
        if self.voice_id.trim().is_empty() {
            return Err("ElevenLabs voice id is required".to_string());
        }
        Ok(())
    }
}

/// Google Cloud TTS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleTtsConfig {
    /// API key passed as a query parameter
    pub api_key: String,
    /// Base URL for the Cloud Text-to-Speech API
    #[serde(default = "default_google_tts_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl GoogleTtsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("Google TTS API key is required".to_string());
        }
        Ok(())
    }
}
