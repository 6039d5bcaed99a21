//! Port definitions for chat-completion models

use async_trait::async_trait;

use crate::error::LlmError;

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Build a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Build an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Build a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// The interpreter system prompt used for translation calls
pub fn interpreter_prompt(from_lang: &str, to_lang: &str) -> String {
    format!(
        "You are a professional simultaneous interpreter. \
         Translate the user's input from {from_lang} to {to_lang}. \
         Maintain the tone, emotion, and nuance. \
         Output ONLY the translated text. Do not add explanations or notes."
    )
}

/// Port for chat-completion models
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run a chat completion over a system prompt and message history
    ///
    /// # Errors
    ///
    /// Returns `LlmError` if the completion fails. Callers decide whether
    /// to fall back; adapters never retry.
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError>;

    /// Translate a single text between two languages
    ///
    /// # Errors
    ///
    /// Returns `LlmError` if the completion fails.
    async fn translate(&self, text: &str, from_lang: &str, to_lang: &str)
    -> Result<String, LlmError> {
        self.complete(
            &interpreter_prompt(from_lang, to_lang),
            &[ChatMessage::user(text)],
        )
        .await
    }

    /// Identity of the underlying engine, for logging
    fn engine_name(&self) -> &'static str;
}
