//! Interpreter HTTP server
//!
//! Main entry point: loads configuration, wires the provider registry and
//! caches, and serves the interpretation and chat APIs.

use std::sync::Arc;

use ai_llm::{DeepseekChatProvider, OpenAiChatProvider};
use ai_speech::{
    DeepgramSttProvider, ElevenLabsTtsProvider, GoogleTtsProvider, WhisperSttProvider,
};
use application::{
    ChatService, InterpreterService, ProviderRegistry, ProviderRouter, RouterConfig, UsageLogger,
    ports::{AudioCachePort, LlmPort, PhraseCachePort, SttPort, TtsPort, UsageStorePort},
};
use infrastructure::{
    AppConfig, ChatModelAdapter, Database, DatabasePoolConfig, FsAudioCache, SpeechToTextAdapter,
    SqliteUsageLog, StaticPhraseCache, TextToSpeechAdapter, init_tracing,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load and validate configuration before anything else can log
    let config = AppConfig::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    init_tracing(&config.server.log_format)?;

    info!(
        "Interpreter server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );
    info!(
        host = %config.server.host,
        port = %config.server.port,
        challenger_ratio = %config.routing.challenger_ratio,
        "Configuration loaded"
    );

    // Database
    let db = Database::new(&DatabasePoolConfig {
        max_connections: config.database.max_connections,
        ..DatabasePoolConfig::file(&config.database.path)
    })
    .await?;
    if config.database.run_migrations {
        db.migrate().await?;
    }

    // Provider adapters, one per engine
    let whisper: Arc<dyn SttPort> = Arc::new(SpeechToTextAdapter::new(WhisperSttProvider::new(
        config.providers.whisper.clone(),
    )?));
    let deepgram: Arc<dyn SttPort> = Arc::new(SpeechToTextAdapter::new(DeepgramSttProvider::new(
        config.providers.deepgram.clone(),
    )?));
    let gpt4o: Arc<dyn LlmPort> = Arc::new(ChatModelAdapter::new(OpenAiChatProvider::new(
        config.providers.openai.clone(),
    )?));
    let deepseek: Arc<dyn LlmPort> = Arc::new(ChatModelAdapter::new(DeepseekChatProvider::new(
        config.providers.deepseek.clone(),
    )?));
    let elevenlabs: Arc<dyn TtsPort> = Arc::new(TextToSpeechAdapter::new(
        ElevenLabsTtsProvider::new(config.providers.elevenlabs.clone())?,
    ));
    let google: Arc<dyn TtsPort> = Arc::new(TextToSpeechAdapter::new(GoogleTtsProvider::new(
        config.providers.google_tts.clone(),
    )?));

    let registry = ProviderRegistry::new(whisper, deepgram, gpt4o, deepseek, elevenlabs, google);
    let router = Arc::new(ProviderRouter::new(
        registry,
        RouterConfig::new(config.routing.challenger_ratio)?,
    ));

    // Cache tiers
    let phrase_cache: Arc<dyn PhraseCachePort> = match &config.cache.phrase_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Arc::new(StaticPhraseCache::from_json_str(&json)?)
        }
        None => Arc::new(StaticPhraseCache::bundled()?),
    };
    let audio_cache: Arc<dyn AudioCachePort> =
        Arc::new(FsAudioCache::new(config.cache.audio_dir.clone()));

    // Usage accounting
    let store: Arc<dyn UsageStorePort> = Arc::new(SqliteUsageLog::new(db.pool().clone()));
    let pricing = config.pricing.to_table().map_err(|e| anyhow::anyhow!(e))?;
    let (usage_logger, logger_task) =
        UsageLogger::spawn(store, pricing, config.pricing.queue_capacity);

    // Services
    let interpreter = InterpreterService::new(
        Arc::clone(&router),
        phrase_cache,
        audio_cache,
        usage_logger.clone(),
    );
    let chat = ChatService::new(router, usage_logger);

    let state = AppState {
        interpreter: Arc::new(interpreter),
        chat: Arc::new(chat),
        config: Arc::new(config.clone()),
    };

    let app = routes::create_router(state);

    // Configure CORS layer
    let app = if config.server.cors_enabled {
        let cors_layer = if config.server.allowed_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use axum::http::{HeaderValue, Method};
            let origins: Vec<HeaderValue> = config
                .server
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
        };
        app.layer(cors_layer)
    } else {
        app
    };

    // Middleware (first added = outermost)
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_audio_bytes,
        ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Serving has finished, so the services and their logger handles are
    // gone. Draining flushes any queued usage records before exit.
    logger_task.drained().await;
    db.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
