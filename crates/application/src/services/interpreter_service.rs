//! Interpretation pipeline orchestrator
//!
//! Drives one request through transcribe -> translate -> synthesize with
//! cost-avoidance checks before each paid stage and cross-stack fallback
//! after each failed one. The routed stack is tried first; when it fails
//! and differs from the default, the default stack gets one attempt. No
//! stage is ever tried more than twice.
//!
//! Synthesis is the only stage allowed to fail outright: a request that
//! produced text but no audio is still a success for the caller.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use domain::{LanguagePair, LlmEngine, ProviderStack, StackId, SttEngine, TtsEngine, UserId};
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{AudioCachePort, PhraseCachePort};
use crate::services::router::ProviderRouter;
use crate::services::usage_logger::{TransactionDraft, UsageLogger};

/// Reply returned when the transcript is empty
///
/// Silence and unintelligible noise short-circuit the pipeline before any
/// model is paid.
pub const UNINTELLIGIBLE_REPLY: &str = "...";

/// An interpretation request after transport decoding
#[derive(Debug, Clone)]
pub struct InterpretRequest {
    /// Uploaded audio bytes
    pub audio: Vec<u8>,
    /// Source -> target languages
    pub languages: LanguagePair,
    /// Requesting user, if identified
    pub user_id: Option<UserId>,
}

/// Result of one interpretation
#[derive(Debug, Clone)]
pub struct InterpretOutcome {
    /// What the user said
    pub original_text: String,
    /// The translation
    pub translated_text: String,
    /// Synthesized speech, absent when every TTS engine failed
    pub audio: Option<Vec<u8>>,
    /// Stack the request was routed to
    pub stack: StackId,
    /// Whether the phrase cache served the translation
    pub cache_hit: bool,
}

impl InterpretOutcome {
    /// Whether spoken output is available
    pub fn audio_available(&self) -> bool {
        self.audio.is_some()
    }
}

/// Orchestrates the speech-to-speech interpretation pipeline
pub struct InterpreterService {
    router: Arc<ProviderRouter>,
    phrase_cache: Arc<dyn PhraseCachePort>,
    audio_cache: Arc<dyn AudioCachePort>,
    usage_logger: UsageLogger,
}

impl fmt::Debug for InterpreterService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpreterService").finish_non_exhaustive()
    }
}

impl InterpreterService {
    /// Create the service
    pub fn new(
        router: Arc<ProviderRouter>,
        phrase_cache: Arc<dyn PhraseCachePort>,
        audio_cache: Arc<dyn AudioCachePort>,
        usage_logger: UsageLogger,
    ) -> Self {
        Self {
            router,
            phrase_cache,
            audio_cache,
            usage_logger,
        }
    }

    /// Interpret one utterance
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty upload, and a stage error when
    /// transcription or translation fails on every configured stack.
    /// Synthesis failure is not an error; the outcome simply carries no
    /// audio.
    #[instrument(skip_all, fields(languages = %request.languages))]
    pub async fn interpret(
        &self,
        request: InterpretRequest,
    ) -> Result<InterpretOutcome, ApplicationError> {
        if request.audio.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "empty audio payload".to_string(),
            ));
        }

        let started = Instant::now();
        let routed = self.router.route_for(request.user_id.as_ref());
        let fallback = ProviderStack::premium();

        let (original_text, stt_used) = self
            .transcribe_with_fallback(&request, &routed, &fallback)
            .await?;

        if original_text.trim().is_empty() {
            debug!("Empty transcript, skipping translation and synthesis");
            self.log(
                &request,
                &original_text,
                UNINTELLIGIBLE_REPLY,
                routed,
                Some(stt_used),
                None,
                None,
                false,
                started,
            );
            return Ok(InterpretOutcome {
                original_text,
                translated_text: UNINTELLIGIBLE_REPLY.to_string(),
                audio: None,
                stack: routed.id,
                cache_hit: false,
            });
        }

        let (translated_text, llm_used, cache_hit) = self
            .translate_with_fallback(&original_text, &request.languages, &routed, &fallback)
            .await?;

        let (audio, tts_used) = self
            .audio_for(&translated_text, &request.languages, &routed, &fallback)
            .await;

        self.log(
            &request,
            &original_text,
            &translated_text,
            routed,
            Some(stt_used),
            llm_used,
            tts_used,
            cache_hit,
            started,
        );

        Ok(InterpretOutcome {
            original_text,
            translated_text,
            audio,
            stack: routed.id,
            cache_hit,
        })
    }

    async fn transcribe_with_fallback(
        &self,
        request: &InterpretRequest,
        routed: &ProviderStack,
        fallback: &ProviderStack,
    ) -> Result<(String, SttEngine), ApplicationError> {
        let language = &request.languages.from;
        match self
            .router
            .transcribe(request.audio.clone(), language, routed)
            .await
        {
            Ok(text) => Ok((text, routed.stt)),
            Err(failure) if routed.stt != fallback.stt => {
                warn!(engine = failure.engine, "Routed transcription failed, falling back");
                match self
                    .router
                    .transcribe(request.audio.clone(), language, fallback)
                    .await
                {
                    Ok(text) => Ok((text, fallback.stt)),
                    Err(second) => Err(ApplicationError::TranscriptionFailed(format!(
                        "{failure}; fallback {second}"
                    ))),
                }
            }
            Err(failure) => Err(ApplicationError::TranscriptionFailed(failure.to_string())),
        }
    }

    async fn translate_with_fallback(
        &self,
        original_text: &str,
        languages: &LanguagePair,
        routed: &ProviderStack,
        fallback: &ProviderStack,
    ) -> Result<(String, Option<LlmEngine>, bool), ApplicationError> {
        if let Some(canned) = self.phrase_cache.lookup(original_text, languages) {
            metrics::counter!("phrase_cache_hits_total").increment(1);
            debug!("Phrase cache hit");
            return Ok((canned, None, true));
        }
        metrics::counter!("phrase_cache_misses_total").increment(1);

        match self
            .router
            .translate(original_text.to_string(), languages.clone(), routed)
            .await
        {
            Ok(text) => Ok((text, Some(routed.llm), false)),
            Err(failure) if routed.llm != fallback.llm => {
                warn!(engine = failure.engine, "Routed translation failed, falling back");
                match self
                    .router
                    .translate(original_text.to_string(), languages.clone(), fallback)
                    .await
                {
                    Ok(text) => Ok((text, Some(fallback.llm), false)),
                    Err(second) => Err(ApplicationError::TranslationFailed(format!(
                        "{failure}; fallback {second}"
                    ))),
                }
            }
            Err(failure) => Err(ApplicationError::TranslationFailed(failure.to_string())),
        }
    }

    /// Obtain audio for the translation: cache, routed TTS, fallback TTS
    ///
    /// Returns `(None, None)` when every source fails; the caller degrades
    /// to a text-only reply.
    async fn audio_for(
        &self,
        translated_text: &str,
        languages: &LanguagePair,
        routed: &ProviderStack,
        fallback: &ProviderStack,
    ) -> (Option<Vec<u8>>, Option<TtsEngine>) {
        let target = &languages.to;
        if let Some(bytes) = self
            .audio_cache
            .lookup(translated_text.to_string(), target.clone())
            .await
        {
            metrics::counter!("audio_cache_hits_total").increment(1);
            debug!("Audio cache hit");
            return (Some(bytes), None);
        }
        metrics::counter!("audio_cache_misses_total").increment(1);

        let synthesized = match self
            .router
            .synthesize(translated_text.to_string(), target, routed)
            .await
        {
            Ok(bytes) => Some((bytes, routed.tts)),
            Err(failure) if routed.tts != fallback.tts => {
                warn!(engine = failure.engine, "Routed synthesis failed, falling back");
                match self
                    .router
                    .synthesize(translated_text.to_string(), target, fallback)
                    .await
                {
                    Ok(bytes) => Some((bytes, fallback.tts)),
                    Err(second) => {
                        warn!(
                            first = %failure,
                            second = %second,
                            "Synthesis failed on every stack, degrading to text-only"
                        );
                        None
                    }
                }
            }
            Err(failure) => {
                warn!(%failure, "Synthesis failed, degrading to text-only");
                None
            }
        };

        match synthesized {
            Some((bytes, engine)) => {
                // Cache only audio a provider actually produced.
                self.audio_cache
                    .store(translated_text.to_string(), target.clone(), bytes.clone())
                    .await;
                (Some(bytes), Some(engine))
            }
            None => (None, None),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn log(
        &self,
        request: &InterpretRequest,
        original_text: &str,
        translated_text: &str,
        routed: ProviderStack,
        stt_used: Option<SttEngine>,
        llm_used: Option<LlmEngine>,
        tts_used: Option<TtsEngine>,
        cache_hit: bool,
        started: Instant,
    ) {
        self.usage_logger.record(TransactionDraft {
            user_id: request.user_id.clone(),
            input_text: original_text.to_string(),
            output_text: translated_text.to_string(),
            languages: request.languages.clone(),
            stt_engine: stt_used,
            llm_engine: llm_used,
            tts_engine: tts_used,
            latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            cache_hit,
            served_by_challenger: routed.is_challenger(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{
        MockAudioCachePort, MockLlmPort, MockPhraseCachePort, MockSttPort, MockTtsPort,
        UsageStorePort,
    };
    use crate::services::router::{ProviderRegistry, RouterConfig};
    use crate::services::usage_logger::{PricingTable, UsageLoggerTask};
    use async_trait::async_trait;
    use domain::UsageRecord;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct CaptureStore {
        records: Mutex<Vec<UsageRecord>>,
    }

    impl CaptureStore {
        fn records(&self) -> Vec<UsageRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UsageStorePort for CaptureStore {
        async fn insert(&self, record: UsageRecord) -> Result<(), ApplicationError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }
    }

    /// Mock providers and caches wired through a real router
    struct Harness {
        whisper: MockSttPort,
        deepgram: MockSttPort,
        gpt4o: MockLlmPort,
        deepseek: MockLlmPort,
        elevenlabs: MockTtsPort,
        google: MockTtsPort,
        phrase_cache: MockPhraseCachePort,
        audio_cache: MockAudioCachePort,
        ratio: f64,
    }

    impl Harness {
        fn new(ratio: f64) -> Self {
            Self {
                whisper: MockSttPort::new(),
                deepgram: MockSttPort::new(),
                gpt4o: MockLlmPort::new(),
                deepseek: MockLlmPort::new(),
                elevenlabs: MockTtsPort::new(),
                google: MockTtsPort::new(),
                phrase_cache: MockPhraseCachePort::new(),
                audio_cache: MockAudioCachePort::new(),
                ratio,
            }
        }

        fn build(self) -> (InterpreterService, Arc<CaptureStore>, UsageLoggerTask) {
            let registry = ProviderRegistry::new(
                Arc::new(self.whisper),
                Arc::new(self.deepgram),
                Arc::new(self.gpt4o),
                Arc::new(self.deepseek),
                Arc::new(self.elevenlabs),
                Arc::new(self.google),
            );
            let router = Arc::new(ProviderRouter::new(
                registry,
                RouterConfig::new(self.ratio).unwrap(),
            ));
            let store = Arc::new(CaptureStore::default());
            let (logger, task) = UsageLogger::spawn(store.clone(), PricingTable::default(), 16);
            let service = InterpreterService::new(
                router,
                Arc::new(self.phrase_cache),
                Arc::new(self.audio_cache),
                logger,
            );
            (service, store, task)
        }
    }

    fn request() -> InterpretRequest {
        InterpretRequest {
            audio: vec![0xff, 0xfb, 0x90, 0x44],
            languages: LanguagePair::parse("es", "en").unwrap(),
            user_id: Some(UserId::new("traveler-42").unwrap()),
        }
    }

    fn down(what: &str) -> ApplicationError {
        ApplicationError::ExternalService(what.to_string())
    }

    #[tokio::test]
    async fn service_debug_elides_its_ports() {
        let (service, _, _task) = Harness::new(0.0).build();
        let rendered = format!("{service:?}");
        assert!(rendered.contains("InterpreterService"));
    }

    #[tokio::test]
    async fn empty_upload_is_invalid_input() {
        let (service, _, _task) = Harness::new(0.0).build();
        let mut req = request();
        req.audio.clear();
        let err = service.interpret(req).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn happy_path_on_premium_stack() {
        let mut h = Harness::new(0.0);
        h.whisper
            .expect_transcribe()
            .returning(|_, _| Ok("hola".to_string()));
        h.phrase_cache.expect_lookup().returning(|_, _| None);
        h.gpt4o
            .expect_translate()
            .returning(|_, _| Ok("hello".to_string()));
        h.audio_cache.expect_lookup().returning(|_, _| None);
        h.elevenlabs
            .expect_synthesize()
            .returning(|_, _| Ok(vec![1, 2, 3]));
        h.audio_cache.expect_store().times(1).returning(|_, _, _| ());

        let (service, store, task) = h.build();
        let outcome = service.interpret(request()).await.unwrap();
        assert_eq!(outcome.original_text, "hola");
        assert_eq!(outcome.translated_text, "hello");
        assert_eq!(outcome.audio, Some(vec![1, 2, 3]));
        assert!(outcome.audio_available());
        assert_eq!(outcome.stack, StackId::Premium);
        assert!(!outcome.cache_hit);

        drop(service);
        task.drained().await;
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stt_engine, Some(SttEngine::OpenAiWhisper));
        assert_eq!(records[0].llm_engine, Some(LlmEngine::Gpt4o));
        assert_eq!(records[0].tts_engine, Some(TtsEngine::ElevenLabs));
        assert!(records[0].cost_estimated > 0.0);
        assert!(!records[0].served_by_challenger);
    }

    #[tokio::test]
    async fn challenger_stt_failure_records_fallback_identity() {
        let mut h = Harness::new(1.0);
        h.deepgram
            .expect_transcribe()
            .times(1)
            .returning(|_, _| Err(down("deepgram outage")));
        h.whisper
            .expect_transcribe()
            .times(1)
            .returning(|_, _| Ok("hola".to_string()));
        h.phrase_cache.expect_lookup().returning(|_, _| None);
        h.deepseek
            .expect_translate()
            .returning(|_, _| Ok("hello".to_string()));
        h.audio_cache.expect_lookup().returning(|_, _| None);
        h.google
            .expect_synthesize()
            .returning(|_, _| Ok(vec![9]));
        h.audio_cache.expect_store().returning(|_, _, _| ());

        let (service, store, task) = h.build();
        let outcome = service.interpret(request()).await.unwrap();
        assert_eq!(outcome.stack, StackId::Challenger);

        drop(service);
        task.drained().await;
        let records = store.records();
        // The record names who actually served, not who was routed.
        assert_eq!(records[0].stt_engine, Some(SttEngine::OpenAiWhisper));
        assert_eq!(records[0].llm_engine, Some(LlmEngine::DeepseekChat));
        assert!(records[0].served_by_challenger);
        assert!(!records[0].cache_hit);
        assert!(records[0].cost_estimated > 0.0);
    }

    #[tokio::test]
    async fn premium_stt_failure_is_terminal_without_duplicate_attempt() {
        let mut h = Harness::new(0.0);
        h.whisper
            .expect_transcribe()
            .times(1)
            .returning(|_, _| Err(down("whisper outage")));

        let (service, _, _task) = h.build();
        let err = service.interpret(request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::TranscriptionFailed(_)));
    }

    #[tokio::test]
    async fn phrase_cache_hit_skips_llm_and_is_free() {
        let mut h = Harness::new(0.0);
        h.whisper
            .expect_transcribe()
            .returning(|_, _| Ok("hola, ¿dónde está el baño?".to_string()));
        h.phrase_cache
            .expect_lookup()
            .returning(|_, _| Some("Hello, where is the bathroom?".to_string()));
        // No expectation on either LLM: any call panics the test.
        h.audio_cache
            .expect_lookup()
            .returning(|_, _| Some(vec![7, 7]));

        let (service, store, task) = h.build();
        let outcome = service.interpret(request()).await.unwrap();
        assert!(outcome.cache_hit);
        assert_eq!(outcome.translated_text, "Hello, where is the bathroom?");
        assert_eq!(outcome.audio, Some(vec![7, 7]));

        drop(service);
        task.drained().await;
        let records = store.records();
        assert!(records[0].cache_hit);
        assert_eq!(records[0].llm_engine, None);
        assert_eq!(records[0].tts_engine, None);
        assert!(records[0].cost_estimated.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn audio_cache_hit_skips_synthesis() {
        let mut h = Harness::new(0.0);
        h.whisper
            .expect_transcribe()
            .returning(|_, _| Ok("gracias".to_string()));
        h.phrase_cache.expect_lookup().returning(|_, _| None);
        h.gpt4o
            .expect_translate()
            .returning(|_, _| Ok("thank you".to_string()));
        h.audio_cache
            .expect_lookup()
            .withf(|text, lang| text.as_str() == "thank you" && lang.as_str() == "en")
            .returning(|_, _| Some(vec![4, 4, 4]));
        // No TTS expectations and no store call.

        let (service, store, task) = h.build();
        let outcome = service.interpret(request()).await.unwrap();
        assert_eq!(outcome.audio, Some(vec![4, 4, 4]));

        drop(service);
        task.drained().await;
        assert_eq!(store.records()[0].tts_engine, None);
    }

    #[tokio::test]
    async fn double_synthesis_failure_degrades_to_text_only() {
        let mut h = Harness::new(1.0);
        h.deepgram
            .expect_transcribe()
            .returning(|_, _| Ok("adiós".to_string()));
        h.phrase_cache.expect_lookup().returning(|_, _| None);
        h.deepseek
            .expect_translate()
            .returning(|_, _| Ok("goodbye".to_string()));
        h.audio_cache.expect_lookup().returning(|_, _| None);
        h.google
            .expect_synthesize()
            .times(1)
            .returning(|_, _| Err(down("google outage")));
        h.elevenlabs
            .expect_synthesize()
            .times(1)
            .returning(|_, _| Err(down("elevenlabs outage")));
        // Nothing gets cached when synthesis fails.

        let (service, store, task) = h.build();
        let outcome = service.interpret(request()).await.unwrap();
        assert_eq!(outcome.translated_text, "goodbye");
        assert!(outcome.audio.is_none());
        assert!(!outcome.audio_available());

        drop(service);
        task.drained().await;
        assert_eq!(store.records()[0].tts_engine, None);
    }

    #[tokio::test]
    async fn empty_transcript_short_circuits_before_any_model() {
        let mut h = Harness::new(0.0);
        h.whisper
            .expect_transcribe()
            .returning(|_, _| Ok("   ".to_string()));
        // No cache, LLM, or TTS expectations: any call panics the test.

        let (service, store, task) = h.build();
        let outcome = service.interpret(request()).await.unwrap();
        assert_eq!(outcome.translated_text, UNINTELLIGIBLE_REPLY);
        assert!(outcome.audio.is_none());
        assert!(!outcome.cache_hit);

        drop(service);
        task.drained().await;
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].llm_engine, None);
        assert_eq!(records[0].tts_engine, None);
    }

    #[tokio::test]
    async fn translation_failure_on_both_stacks_is_terminal() {
        let mut h = Harness::new(1.0);
        h.deepgram
            .expect_transcribe()
            .returning(|_, _| Ok("hola".to_string()));
        h.phrase_cache.expect_lookup().returning(|_, _| None);
        h.deepseek
            .expect_translate()
            .times(1)
            .returning(|_, _| Err(down("deepseek outage")));
        h.gpt4o
            .expect_translate()
            .times(1)
            .returning(|_, _| Err(down("openai outage")));

        let (service, _, _task) = h.build();
        let err = service.interpret(request()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::TranslationFailed(_)));
    }
}
