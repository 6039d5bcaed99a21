//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// The pipeline variants carry the stage at which a request died so that
/// callers can report *where* a degraded request failed, not just that it
/// did. A stage error is only raised after every configured provider for
/// that stage has been tried.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request payload was malformed or empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// All configured speech-to-text providers failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// All configured language models failed to translate
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// All configured language models failed a chat completion
    #[error("Chat completion failed: {0}")]
    CompletionFailed(String),

    /// All configured speech-synthesis providers failed
    ///
    /// The orchestrator downgrades this to a partial success; it only
    /// escapes when synthesis is the caller's sole purpose.
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// External service error outside the pipeline stages
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::RateLimited | ApplicationError::ExternalService(_)
        )
    }

    /// Pipeline stage this error belongs to, if any
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            ApplicationError::TranscriptionFailed(_) => Some("transcription"),
            ApplicationError::TranslationFailed(_) => Some("translation"),
            ApplicationError::CompletionFailed(_) => Some("chat"),
            ApplicationError::SynthesisFailed(_) => Some("synthesis"),
            _ => None,
        }
    }
}
