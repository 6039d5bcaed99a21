//! Provider routing - deterministic A/B traffic splitting
//!
//! Each identified user hashes into a bucket in `[0, 1)`; users below the
//! configured challenger ratio are served by the challenger stack, the
//! rest by premium. The assignment is a pure function of the user id and
//! the ratio, so a user sees a consistent stack across requests and the
//! split survives restarts. Anonymous requests always route premium.
//!
//! The router performs exactly one provider call per attempt. Fallback
//! across stacks is the orchestrator's decision, not the router's.

use std::fmt;
use std::sync::Arc;

use domain::{LanguageCode, LanguagePair, LlmEngine, ProviderStack, SttEngine, TtsEngine, UserId};
use tracing::{debug, warn};

use crate::error::ApplicationError;
use crate::ports::{ChatTurn, LlmPort, SttPort, TtsPort};

/// Routing configuration
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    challenger_ratio: f64,
}

impl RouterConfig {
    /// Create a config with the given challenger traffic share
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the ratio is outside
    /// `[0, 1]` or not a number.
    pub fn new(challenger_ratio: f64) -> Result<Self, ApplicationError> {
        if !(0.0..=1.0).contains(&challenger_ratio) {
            return Err(ApplicationError::Configuration(format!(
                "challenger ratio must be within [0, 1], got {challenger_ratio}"
            )));
        }
        Ok(Self { challenger_ratio })
    }

    /// Share of identified traffic routed to the challenger stack
    pub fn challenger_ratio(&self) -> f64 {
        self.challenger_ratio
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            challenger_ratio: 0.5,
        }
    }
}

/// One adapter per engine, held behind the capability ports
pub struct ProviderRegistry {
    whisper: Arc<dyn SttPort>,
    deepgram: Arc<dyn SttPort>,
    gpt4o: Arc<dyn LlmPort>,
    deepseek: Arc<dyn LlmPort>,
    elevenlabs: Arc<dyn TtsPort>,
    google: Arc<dyn TtsPort>,
}

impl ProviderRegistry {
    /// Assemble the registry from one adapter per engine
    pub fn new(
        whisper: Arc<dyn SttPort>,
        deepgram: Arc<dyn SttPort>,
        gpt4o: Arc<dyn LlmPort>,
        deepseek: Arc<dyn LlmPort>,
        elevenlabs: Arc<dyn TtsPort>,
        google: Arc<dyn TtsPort>,
    ) -> Self {
        Self {
            whisper,
            deepgram,
            gpt4o,
            deepseek,
            elevenlabs,
            google,
        }
    }

    fn stt(&self, engine: SttEngine) -> &dyn SttPort {
        match engine {
            SttEngine::OpenAiWhisper => self.whisper.as_ref(),
            SttEngine::DeepgramNova => self.deepgram.as_ref(),
        }
    }

    fn llm(&self, engine: LlmEngine) -> &dyn LlmPort {
        match engine {
            LlmEngine::Gpt4o => self.gpt4o.as_ref(),
            LlmEngine::DeepseekChat => self.deepseek.as_ref(),
        }
    }

    fn tts(&self, engine: TtsEngine) -> &dyn TtsPort {
        match engine {
            TtsEngine::ElevenLabs => self.elevenlabs.as_ref(),
            TtsEngine::GoogleNeural => self.google.as_ref(),
        }
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry").finish_non_exhaustive()
    }
}

/// A single failed provider attempt
#[derive(Debug, Clone)]
pub struct RouteFailure {
    /// Stable id of the engine that failed
    pub engine: &'static str,
    /// What the provider reported
    pub reason: String,
}

impl fmt::Display for RouteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.engine, self.reason)
    }
}

/// Routes requests to provider stacks and runs single attempts
#[derive(Debug)]
pub struct ProviderRouter {
    registry: ProviderRegistry,
    config: RouterConfig,
}

impl ProviderRouter {
    /// Create a router over the given registry
    pub fn new(registry: ProviderRegistry, config: RouterConfig) -> Self {
        Self { registry, config }
    }

    /// Pick the stack serving this request
    pub fn route_for(&self, user: Option<&UserId>) -> ProviderStack {
        let Some(user) = user else {
            return ProviderStack::premium();
        };
        let bucket = Self::bucket(user);
        let stack = if bucket < self.config.challenger_ratio {
            ProviderStack::challenger()
        } else {
            ProviderStack::premium()
        };
        debug!(user = %user, bucket, stack = %stack.id, "Routed request");
        stack
    }

    /// Hash a user id into `[0, 1)`
    fn bucket(user: &UserId) -> f64 {
        let hash = blake3::hash(user.as_bytes());
        let bytes = hash.as_bytes();
        let head = u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]);
        Self::unit_interval(head)
    }

    /// Map a hash head onto `[0, 1)`
    ///
    /// Keeps 53 bits so the conversion to f64 is exact; dividing the full
    /// 64 bits would round heads near `u64::MAX` up to 1.0.
    fn unit_interval(head: u64) -> f64 {
        (head >> 11) as f64 / (1u64 << 53) as f64
    }

    /// One transcription attempt on the given stack
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        language: &LanguageCode,
        stack: &ProviderStack,
    ) -> Result<String, RouteFailure> {
        let engine = stack.stt;
        match self
            .registry
            .stt(engine)
            .transcribe(audio, language.clone())
            .await
        {
            Ok(text) => Ok(text),
            Err(error) => {
                warn!(engine = engine.as_str(), %error, "Transcription attempt failed");
                metrics::counter!("provider_failures_total", "engine" => engine.as_str())
                    .increment(1);
                Err(RouteFailure {
                    engine: engine.as_str(),
                    reason: error.to_string(),
                })
            }
        }
    }

    /// One translation attempt on the given stack
    pub async fn translate(
        &self,
        text: String,
        languages: LanguagePair,
        stack: &ProviderStack,
    ) -> Result<String, RouteFailure> {
        let engine = stack.llm;
        match self.registry.llm(engine).translate(text, languages).await {
            Ok(translated) => Ok(translated),
            Err(error) => {
                warn!(engine = engine.as_str(), %error, "Translation attempt failed");
                metrics::counter!("provider_failures_total", "engine" => engine.as_str())
                    .increment(1);
                Err(RouteFailure {
                    engine: engine.as_str(),
                    reason: error.to_string(),
                })
            }
        }
    }

    /// One chat-completion attempt on the given stack
    pub async fn complete_chat(
        &self,
        system_prompt: String,
        turns: Vec<ChatTurn>,
        stack: &ProviderStack,
    ) -> Result<String, RouteFailure> {
        let engine = stack.llm;
        match self
            .registry
            .llm(engine)
            .complete(system_prompt, turns)
            .await
        {
            Ok(reply) => Ok(reply),
            Err(error) => {
                warn!(engine = engine.as_str(), %error, "Chat completion attempt failed");
                metrics::counter!("provider_failures_total", "engine" => engine.as_str())
                    .increment(1);
                Err(RouteFailure {
                    engine: engine.as_str(),
                    reason: error.to_string(),
                })
            }
        }
    }

    /// One synthesis attempt on the given stack
    pub async fn synthesize(
        &self,
        text: String,
        language: &LanguageCode,
        stack: &ProviderStack,
    ) -> Result<Vec<u8>, RouteFailure> {
        let engine = stack.tts;
        match self
            .registry
            .tts(engine)
            .synthesize(text, language.clone())
            .await
        {
            Ok(audio) => Ok(audio),
            Err(error) => {
                warn!(engine = engine.as_str(), %error, "Synthesis attempt failed");
                metrics::counter!("provider_failures_total", "engine" => engine.as_str())
                    .increment(1);
                Err(RouteFailure {
                    engine: engine.as_str(),
                    reason: error.to_string(),
                })
            }
        }
    }
}
