//! Named provider stacks
//!
//! A stack bundles one engine per capability. Two stacks exist today; the
//! model keeps an ordered list so a third can be added as an enum variant
//! plus one entry in `ProviderStack::all()`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::engines::{LlmEngine, SttEngine, TtsEngine};

/// Identity of a configured provider stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackId {
    /// The default stack (OpenAI / ElevenLabs)
    Premium,
    /// The cost-challenger stack (Deepgram / DeepSeek / Google)
    Challenger,
}

impl StackId {
    /// Stable string id
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Challenger => "challenger",
        }
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable bundle of one engine per capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStack {
    /// Stack identity
    pub id: StackId,
    /// Speech-to-text engine
    pub stt: SttEngine,
    /// Language-model engine
    pub llm: LlmEngine,
    /// Speech-synthesis engine
    pub tts: TtsEngine,
}

impl ProviderStack {
    /// The premium stack: Whisper / GPT-4o / ElevenLabs
    pub const fn premium() -> Self {
        Self {
            id: StackId::Premium,
            stt: SttEngine::OpenAiWhisper,
            llm: LlmEngine::Gpt4o,
            tts: TtsEngine::ElevenLabs,
        }
    }

    /// The challenger stack: Deepgram / DeepSeek / Google Neural
    pub const fn challenger() -> Self {
        Self {
            id: StackId::Challenger,
            stt: SttEngine::DeepgramNova,
            llm: LlmEngine::DeepseekChat,
            tts: TtsEngine::GoogleNeural,
        }
    }

    /// Resolve a stack by id
    pub const fn for_id(id: StackId) -> Self {
        match id {
            StackId::Premium => Self::premium(),
            StackId::Challenger => Self::challenger(),
        }
    }

    /// All configured stacks, in priority order
    pub const fn all() -> [Self; 2] {
        [Self::premium(), Self::challenger()]
    }

    /// Whether this is the challenger stack
    pub const fn is_challenger(&self) -> bool {
        matches!(self.id, StackId::Challenger)
    }
}
