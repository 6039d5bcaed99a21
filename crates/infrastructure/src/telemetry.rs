//! Tracing initialization
//!
//! Console-only structured logging. The filter is taken from `RUST_LOG`
//! when set, otherwise from the configured default.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize the tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}

const DEFAULT_LOG_FILTER: &str = "interpreter=info,application=info,infrastructure=info,tower_http=info";

/// Initialize the global tracing subscriber
///
/// `log_format` selects the output encoding: `"json"` for one JSON object
/// per line, anything else for human-readable text.
///
/// # Errors
///
/// Returns [`TelemetryError::Init`] if a global subscriber is already set.
pub fn init_tracing(log_format: &str) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
            .map_err(|e| TelemetryError::Init(e.to_string()))?;
    }

    info!(format = %log_format, "Tracing initialized");
    Ok(())
}
