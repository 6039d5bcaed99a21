//! Asynchronous usage and cost logging
//!
//! Completed transactions are pushed onto a bounded channel and persisted
//! by a background worker, so accounting never adds latency to the request
//! path. When the queue is full the record is dropped and counted; losing
//! an accounting row is preferable to stalling a live translation.
//!
//! The worker owns the pricing table. Cost is computed here, next to the
//! invariant check, so no caller can persist a cache hit with a price tag.

use std::collections::HashMap;
use std::sync::Arc;

use domain::{LanguagePair, LlmEngine, SttEngine, TtsEngine, UsageRecord, UserId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::UsageStorePort;

/// Audio duration assumed for speech-to-text pricing, in seconds
///
/// Vendors bill STT by audio minute but the upload path does not decode
/// durations yet. A flat five seconds matches typical utterance length.
const STT_BILLED_SECONDS: f64 = 5.0;

/// Per-character input/output rates for a language model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharRates {
    /// USD per input character
    pub input: f64,
    /// USD per output character
    pub output: f64,
}

/// Provider pricing, keyed by engine identity
#[derive(Debug, Clone)]
pub struct PricingTable {
    stt_per_minute: HashMap<SttEngine, f64>,
    llm_per_char: HashMap<LlmEngine, CharRates>,
    tts_per_char: HashMap<TtsEngine, f64>,
}

impl Default for PricingTable {
    /// List prices as published by the vendors
    fn default() -> Self {
        let mut table = Self {
            stt_per_minute: HashMap::new(),
            llm_per_char: HashMap::new(),
            tts_per_char: HashMap::new(),
        };
        table.set_stt_rate(SttEngine::OpenAiWhisper, 0.006);
        table.set_stt_rate(SttEngine::DeepgramNova, 0.004);
        table.set_llm_rates(
            LlmEngine::Gpt4o,
            CharRates {
                input: 0.000_005,
                output: 0.000_015,
            },
        );
        table.set_llm_rates(
            LlmEngine::DeepseekChat,
            CharRates {
                input: 0.000_000_1,
                output: 0.000_000_2,
            },
        );
        table.set_tts_rate(TtsEngine::ElevenLabs, 0.000_3);
        table.set_tts_rate(TtsEngine::GoogleNeural, 0.000_016);
        table
    }
}

impl PricingTable {
    /// Override the per-minute rate for an STT engine
    pub fn set_stt_rate(&mut self, engine: SttEngine, usd_per_minute: f64) {
        self.stt_per_minute.insert(engine, usd_per_minute);
    }

    /// Override the per-character rates for a language model
    pub fn set_llm_rates(&mut self, engine: LlmEngine, rates: CharRates) {
        self.llm_per_char.insert(engine, rates);
    }

    /// Override the per-character rate for a TTS engine
    pub fn set_tts_rate(&mut self, engine: TtsEngine, usd_per_char: f64) {
        self.tts_per_char.insert(engine, usd_per_char);
    }

    /// Estimate the cost of one transaction in USD
    ///
    /// A cache hit is free regardless of which engines ran. Engines the
    /// transaction skipped contribute nothing.
    pub fn estimate(&self, draft: &TransactionDraft) -> f64 {
        if draft.cache_hit {
            return 0.0;
        }

        let input_chars = draft.input_text.chars().count() as f64;
        let output_chars = draft.output_text.chars().count() as f64;
        let mut cost = 0.0;

        if let Some(engine) = draft.stt_engine {
            let per_minute = self.stt_per_minute.get(&engine).copied().unwrap_or(0.0);
            cost += per_minute * (STT_BILLED_SECONDS / 60.0);
        }
        if let Some(engine) = draft.llm_engine {
            if let Some(rates) = self.llm_per_char.get(&engine) {
                cost += input_chars * rates.input + output_chars * rates.output;
            }
        }
        if let Some(engine) = draft.tts_engine {
            let per_char = self.tts_per_char.get(&engine).copied().unwrap_or(0.0);
            cost += output_chars * per_char;
        }

        cost
    }
}

/// A completed transaction awaiting pricing and persistence
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    /// Requesting user, if identified
    pub user_id: Option<UserId>,
    /// Transcribed or submitted input text
    pub input_text: String,
    /// Produced output text
    pub output_text: String,
    /// Language pair of the transaction
    pub languages: LanguagePair,
    /// STT engine that actually served, if any ran
    pub stt_engine: Option<SttEngine>,
    /// LLM engine that actually served, if any ran
    pub llm_engine: Option<LlmEngine>,
    /// TTS engine that actually served, if any ran
    pub tts_engine: Option<TtsEngine>,
    /// End-to-end latency in milliseconds
    pub latency_ms: u64,
    /// Whether the phrase cache served the output
    pub cache_hit: bool,
    /// Whether the challenger stack was routed
    pub served_by_challenger: bool,
}

/// Cheap cloneable handle for submitting transactions
#[derive(Debug, Clone)]
pub struct UsageLogger {
    tx: mpsc::Sender<TransactionDraft>,
}

/// Join handle for the background worker
#[derive(Debug)]
pub struct UsageLoggerTask {
    handle: JoinHandle<()>,
}

impl UsageLogger {
    /// Spawn the background worker and return a submission handle
    pub fn spawn(
        store: Arc<dyn UsageStorePort>,
        pricing: PricingTable,
        capacity: usize,
    ) -> (Self, UsageLoggerTask) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = tokio::spawn(run_worker(store, pricing, rx));
        (Self { tx }, UsageLoggerTask { handle })
    }

    /// Submit a transaction without waiting
    ///
    /// Never blocks: a full queue drops the record with a warning.
    pub fn record(&self, draft: TransactionDraft) {
        match self.tx.try_send(draft) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                metrics::counter!("usage_records_dropped_total").increment(1);
                warn!("Usage log queue is full, dropping record");
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Usage log worker has stopped, dropping record");
            }
        }
    }
}

impl UsageLoggerTask {
    /// Wait for the worker to drain and exit
    ///
    /// The worker exits once every `UsageLogger` handle has been dropped
    /// and the queue is empty.
    pub async fn drained(self) {
        if let Err(error) = self.handle.await {
            warn!(%error, "Usage log worker panicked");
        }
    }
}

async fn run_worker(
    store: Arc<dyn UsageStorePort>,
    pricing: PricingTable,
    mut rx: mpsc::Receiver<TransactionDraft>,
) {
    while let Some(draft) = rx.recv().await {
        let cost = pricing.estimate(&draft);
        let record = UsageRecord::new(
            draft.user_id,
            draft.input_text,
            draft.output_text,
            draft.languages,
            draft.stt_engine,
            draft.llm_engine,
            draft.tts_engine,
            draft.latency_ms,
            cost,
            draft.cache_hit,
            draft.served_by_challenger,
        );
        if let Err(error) = record.validate() {
            warn!(%error, "Discarding invalid usage record");
            continue;
        }
        if let Err(error) = store.insert(record).await {
            warn!(%error, "Failed to persist usage record");
        }
    }
    debug!("Usage log queue drained");
}
