//! Vendor-specific chat-completion providers

mod deepseek;
mod openai;
mod openai_compat;

pub use deepseek::DeepseekChatProvider;
pub use openai::OpenAiChatProvider;
