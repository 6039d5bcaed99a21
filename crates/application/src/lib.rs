//! Application layer - use cases and orchestration
//!
//! Owns the pipeline semantics: which provider serves a request, in what
//! order the stages run, what counts as a failure, and how transactions
//! are accounted. Talks to vendors and storage exclusively through ports.

pub mod error;
pub mod ports;
pub mod services;
pub mod text;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
pub use text::normalize_utterance;
