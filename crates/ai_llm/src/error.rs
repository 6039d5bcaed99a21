//! LLM adapter errors

use thiserror::Error;

/// Errors that can occur during chat completion calls
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to connect to the vendor
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the vendor failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Completion failed with a vendor error
    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    /// Vendor returned a response we could not parse
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded the adapter timeout
    #[error("Completion timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(15_000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
