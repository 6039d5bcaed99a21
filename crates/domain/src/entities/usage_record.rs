//! Usage transaction record
//!
//! One record is created per completed orchestration call and persisted
//! asynchronously. The core never mutates or deletes a record after
//! creation; retention is an external concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::value_objects::{LanguagePair, LlmEngine, SttEngine, TtsEngine, UserId};

/// A per-transaction usage and cost record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Unique record id
    pub id: Uuid,
    /// Requesting user, if the request carried an identifier
    pub user_id: Option<UserId>,
    /// Transcribed input text
    pub input_text: String,
    /// Translated / generated output text
    pub output_text: String,
    /// Language pair of the transaction
    pub languages: LanguagePair,
    /// STT engine actually used (fallback identity when fallback served)
    pub stt_engine: Option<SttEngine>,
    /// LLM engine actually used; None when the phrase cache served the text
    pub llm_engine: Option<LlmEngine>,
    /// TTS engine actually used; None for cache hits, chat turns, and
    /// synthesis failures
    pub tts_engine: Option<TtsEngine>,
    /// End-to-end latency in milliseconds
    pub latency_ms: u64,
    /// Estimated cost in USD
    pub cost_estimated: f64,
    /// Whether the phrase cache served the translation
    pub cache_hit: bool,
    /// Whether the challenger stack was routed for this request
    pub served_by_challenger: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UsageRecord {
    /// Create a record with a fresh id and the current timestamp
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: Option<UserId>,
        input_text: impl Into<String>,
        output_text: impl Into<String>,
        languages: LanguagePair,
        stt_engine: Option<SttEngine>,
        llm_engine: Option<LlmEngine>,
        tts_engine: Option<TtsEngine>,
        latency_ms: u64,
        cost_estimated: f64,
        cache_hit: bool,
        served_by_challenger: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            input_text: input_text.into(),
            output_text: output_text.into(),
            languages,
            stt_engine,
            llm_engine,
            tts_engine,
            latency_ms,
            cost_estimated,
            cache_hit,
            served_by_challenger,
            created_at: Utc::now(),
        }
    }

    /// Check the record invariants
    ///
    /// A cache hit must carry (approximately) zero cost, and cost is never
    /// negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.cache_hit && self.cost_estimated.abs() > f64::EPSILON {
            return Err(DomainError::InvalidUsageRecord(format!(
                "cache hit with non-zero cost {}",
                self.cost_estimated
            )));
        }
        if self.cost_estimated < 0.0 {
            return Err(DomainError::InvalidUsageRecord(
                "negative estimated cost".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> LanguagePair {
        LanguagePair::parse("es", "en").unwrap()
    }

    fn record(cache_hit: bool, cost: f64) -> UsageRecord {
        UsageRecord::new(
            None,
            "hola",
            "hello",
            pair(),
            Some(SttEngine::OpenAiWhisper),
            Some(LlmEngine::Gpt4o),
            Some(TtsEngine::ElevenLabs),
            812,
            cost,
            cache_hit,
            false,
        )
    }

    #[test]
    fn new_records_get_unique_ids() {
        assert_ne!(record(false, 0.01).id, record(false, 0.01).id);
    }

    #[test]
    fn cache_hit_with_zero_cost_is_valid() {
        assert!(record(true, 0.0).validate().is_ok());
    }

    #[test]
    fn cache_hit_with_cost_violates_invariant() {
        assert!(record(true, 0.002).validate().is_err());
    }

    #[test]
    fn negative_cost_violates_invariant() {
        assert!(record(false, -0.1).validate().is_err());
    }

    #[test]
    fn miss_with_cost_is_valid() {
        assert!(record(false, 0.0042).validate().is_ok());
    }
}
