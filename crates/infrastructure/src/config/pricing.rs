//! Accounting configuration.
//!
//! Rate overrides are keyed by the stable engine ids ("openai-whisper",
//! "gpt-4o", ...). Unknown keys are rejected at validation so a typo in a
//! rate override cannot silently bill at list price.

use std::collections::HashMap;

use application::services::usage_logger::{CharRates, PricingTable};
use domain::{LlmEngine, SttEngine, TtsEngine};
use serde::{Deserialize, Serialize};

/// Usage accounting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Bounded queue capacity for the background usage logger
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Per-minute STT rate overrides in USD, keyed by engine id
    #[serde(default)]
    pub stt_per_minute: HashMap<String, f64>,

    /// Per-input-character LLM rate overrides in USD, keyed by engine id
    #[serde(default)]
    pub llm_input_per_char: HashMap<String, f64>,

    /// Per-output-character LLM rate overrides in USD, keyed by engine id
    #[serde(default)]
    pub llm_output_per_char: HashMap<String, f64>,

    /// Per-character TTS rate overrides in USD, keyed by engine id
    #[serde(default)]
    pub tts_per_char: HashMap<String, f64>,
}

const fn default_queue_capacity() -> usize {
    256
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            stt_per_minute: HashMap::new(),
            llm_input_per_char: HashMap::new(),
            llm_output_per_char: HashMap::new(),
            tts_per_char: HashMap::new(),
        }
    }
}

fn parse_stt(id: &str) -> Option<SttEngine> {
    match id {
        "openai-whisper" => Some(SttEngine::OpenAiWhisper),
        "deepgram" => Some(SttEngine::DeepgramNova),
        _ => None,
    }
}

fn parse_llm(id: &str) -> Option<LlmEngine> {
    match id {
        "gpt-4o" => Some(LlmEngine::Gpt4o),
        "deepseek-chat" => Some(LlmEngine::DeepseekChat),
        _ => None,
    }
}

fn parse_tts(id: &str) -> Option<TtsEngine> {
    match id {
        "elevenlabs" => Some(TtsEngine::ElevenLabs),
        "google-neural" => Some(TtsEngine::GoogleNeural),
        _ => None,
    }
}

impl PricingConfig {
    /// Build the runtime pricing table: list prices plus overrides
    ///
    /// # Errors
    ///
    /// Returns the offending key when an override names an unknown engine,
    /// or when an output rate is given without the matching input rate.
    pub fn to_table(&self) -> Result<PricingTable, String> {
        let mut table = PricingTable::default();

        for (id, rate) in &self.stt_per_minute {
            let engine = parse_stt(id).ok_or_else(|| format!("unknown STT engine '{id}'"))?;
            table.set_stt_rate(engine, *rate);
        }
        for (id, input) in &self.llm_input_per_char {
            let engine = parse_llm(id).ok_or_else(|| format!("unknown LLM engine '{id}'"))?;
            let output = self.llm_output_per_char.get(id).copied().unwrap_or(*input);
            table.set_llm_rates(
                engine,
                CharRates {
                    input: *input,
                    output,
                },
            );
        }
        for id in self.llm_output_per_char.keys() {
            if parse_llm(id).is_none() {
                return Err(format!("unknown LLM engine '{id}'"));
            }
            if !self.llm_input_per_char.contains_key(id) {
                return Err(format!(
                    "llm_output_per_char '{id}' has no matching llm_input_per_char entry"
                ));
            }
        }
        for (id, rate) in &self.tts_per_char {
            let engine = parse_tts(id).ok_or_else(|| format!("unknown TTS engine '{id}'"))?;
            table.set_tts_rate(engine, *rate);
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::services::usage_logger::TransactionDraft;
    use domain::LanguagePair;

    fn stt_only_draft(engine: SttEngine) -> TransactionDraft {
        TransactionDraft {
            user_id: None,
            input_text: String::new(),
            output_text: String::new(),
            languages: LanguagePair::parse("es", "en").unwrap(),
            stt_engine: Some(engine),
            llm_engine: None,
            tts_engine: None,
            latency_ms: 0,
            cache_hit: false,
            served_by_challenger: false,
        }
    }

    #[test]
    fn defaults_produce_list_prices() {
        let table = PricingConfig::default().to_table().unwrap();
        let cost = table.estimate(&stt_only_draft(SttEngine::OpenAiWhisper));
        assert!((cost - 0.006 * (5.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn overrides_replace_list_prices() {
        let mut config = PricingConfig::default();
        config
            .stt_per_minute
            .insert("openai-whisper".to_string(), 0.012);
        let table = config.to_table().unwrap();
        let cost = table.estimate(&stt_only_draft(SttEngine::OpenAiWhisper));
        assert!((cost - 0.012 * (5.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn unknown_engine_id_is_rejected() {
        let mut config = PricingConfig::default();
        config.tts_per_char.insert("polly".to_string(), 0.001);
        assert!(config.to_table().is_err());
    }

    #[test]
    fn default_queue_capacity_matches_the_serde_default() {
        assert_eq!(PricingConfig::default().queue_capacity, 256);
    }

    #[test]
    fn output_rate_without_input_rate_is_rejected() {
        let mut config = PricingConfig::default();
        config
            .llm_output_per_char
            .insert("gpt-4o".to_string(), 0.000_02);
        let err = config.to_table().unwrap_err();
        assert!(err.contains("llm_input_per_char"));
    }
}
