//! Chat provider configuration

use serde::{Deserialize, Serialize};

/// Default per-call timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Configuration shared by all chat-completion providers
///
/// The base URL defaults differ per provider and are supplied by the
/// provider constructors; configs loaded from files may override them to
/// point at a mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatProviderConfig {
    /// API key (bearer token)
    pub api_key: String,
    /// Base URL override; `None` keeps the provider default
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ChatProviderConfig {
    /// Build a config with just an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Override the base URL (tests, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_api_key() {
        assert!(ChatProviderConfig::new("  ").validate().is_err());
        assert!(ChatProviderConfig::new("sk-x").validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ChatProviderConfig =
            serde_json::from_str(r#"{"api_key": "sk-x"}"#).unwrap();
        assert!(config.base_url.is_none());
        assert_eq!(config.timeout_ms, 15_000);
    }
}
