//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains provider adapters, the cache tiers, SQLite persistence and
//! configuration loading.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::{ChatModelAdapter, SpeechToTextAdapter, TextToSpeechAdapter};
pub use cache::{FsAudioCache, StaticPhraseCache};
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, Environment, PricingConfig, ProvidersConfig,
    RoutingConfig, ServerConfig,
};
pub use persistence::{Database, DatabaseError, DatabasePoolConfig, SqliteUsageLog};
pub use telemetry::{TelemetryError, init_tracing};
