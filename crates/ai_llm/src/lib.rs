//! Language-model adapters
//!
//! Chat-completion wrappers around the LLM vendors the pipeline uses for
//! translation and scenario chat. DeepSeek exposes an OpenAI-compatible
//! API, so both providers share one wire client; everything vendor-specific
//! (base URL, model name, temperature) lives in the provider types.

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;

pub use config::ChatProviderConfig;
pub use error::LlmError;
pub use ports::{ChatMessage, ChatModel, interpreter_prompt};
pub use providers::{DeepseekChatProvider, OpenAiChatProvider};
