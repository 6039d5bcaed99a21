//! Provider engine identities
//!
//! Closed enums for each capability so that adding an engine is a
//! compile-time-checked change. The string ids are stable: they key the
//! pricing table and are persisted on usage records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Speech-to-text engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SttEngine {
    /// OpenAI Whisper (`whisper-1`)
    #[serde(rename = "openai-whisper")]
    OpenAiWhisper,
    /// Deepgram nova-2 prerecorded
    #[serde(rename = "deepgram")]
    DeepgramNova,
}

impl SttEngine {
    /// Stable string id
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAiWhisper => "openai-whisper",
            Self::DeepgramNova => "deepgram",
        }
    }
}

impl fmt::Display for SttEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language-model engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmEngine {
    /// OpenAI GPT-4o
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    /// DeepSeek chat (OpenAI-compatible API)
    #[serde(rename = "deepseek-chat")]
    DeepseekChat,
}

impl LlmEngine {
    /// Stable string id
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::DeepseekChat => "deepseek-chat",
        }
    }
}

impl fmt::Display for LlmEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speech-synthesis engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TtsEngine {
    /// ElevenLabs multilingual
    #[serde(rename = "elevenlabs")]
    ElevenLabs,
    /// Google Cloud Neural2 voices
    #[serde(rename = "google-neural")]
    GoogleNeural,
}

impl TtsEngine {
    /// Stable string id
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ElevenLabs => "elevenlabs",
            Self::GoogleNeural => "google-neural",
        }
    }
}

impl fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
