//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `routing`: A/B traffic split
//! - `providers`: vendor credentials and endpoints
//! - `cache`: phrase dictionary and audio cache locations
//! - `pricing`: usage accounting and rate overrides
//! - `database`: SQLite database settings

mod cache;
mod database;
mod pricing;
mod providers;
mod routing;
mod server;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use pricing::PricingConfig;
pub use providers::ProvidersConfig;
pub use routing::RoutingConfig;
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed validation
    #[default]
    Development,
    /// Production environment - strict validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// A/B routing configuration
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Provider credentials and endpoints
    pub providers: ProvidersConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Usage accounting configuration
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `config/default` (any supported extension) from the working
    /// directory when present, then applies environment variables with the
    /// `INTERP` prefix. Levels are separated by a double underscore so
    /// field names that contain underscores stay addressable, e.g.
    /// `INTERP_ROUTING__CHALLENGER_RATIO=0.25` or
    /// `INTERP_PROVIDERS__DEEPGRAM__API_KEY=...`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(Self::env_source());

        let config = builder.build()?;
        config.try_deserialize()
    }

    fn env_source() -> config::Environment {
        config::Environment::with_prefix("INTERP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns the first constraint violation found.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.routing.challenger_ratio) {
            return Err(format!(
                "routing.challenger_ratio must be within [0, 1], got {}",
                self.routing.challenger_ratio
            ));
        }
        if self.pricing.queue_capacity == 0 {
            return Err("pricing.queue_capacity must be at least 1".to_string());
        }
        self.providers.validate()?;
        self.pricing.to_table().map(|_| ()).map_err(|e| format!("pricing: {e}"))
    }
}
