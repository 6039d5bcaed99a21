//! Domain-level errors

use thiserror::Error;

/// Errors raised by value-object and entity construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Language code is not a two-letter ISO 639-1 code
    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),

    /// User identifier is empty or malformed
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    /// A usage record violated one of its invariants
    #[error("Invalid usage record: {0}")]
    InvalidUsageRecord(String),
}
