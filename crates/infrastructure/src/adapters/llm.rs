//! Adapter bridging chat-completion vendor clients onto the LLM port

use ai_llm::{ChatMessage, ChatModel, LlmError};
use application::error::ApplicationError;
use application::ports::{ChatRole, ChatTurn, LlmPort};
use async_trait::async_trait;
use domain::LanguagePair;

/// Wraps a vendor chat model as an `LlmPort`
#[derive(Debug)]
pub struct ChatModelAdapter<P> {
    provider: P,
}

impl<P> ChatModelAdapter<P> {
    /// Wrap a vendor client
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: ChatModel> LlmPort for ChatModelAdapter<P> {
    async fn translate(
        &self,
        text: String,
        languages: LanguagePair,
    ) -> Result<String, ApplicationError> {
        self.provider
            .translate(&text, languages.from.as_str(), languages.to.as_str())
            .await
            .map_err(map_llm_error)
    }

    async fn complete(
        &self,
        system_prompt: String,
        turns: Vec<ChatTurn>,
    ) -> Result<String, ApplicationError> {
        let messages: Vec<ChatMessage> = turns.into_iter().map(to_message).collect();
        self.provider
            .complete(&system_prompt, &messages)
            .await
            .map_err(map_llm_error)
    }
}

fn to_message(turn: ChatTurn) -> ChatMessage {
    match turn.role {
        ChatRole::System => ChatMessage::system(turn.content),
        ChatRole::User => ChatMessage::user(turn.content),
        ChatRole::Assistant => ChatMessage::assistant(turn.content),
    }
}

fn map_llm_error(error: LlmError) -> ApplicationError {
    match error {
        LlmError::RateLimited => ApplicationError::RateLimited,
        LlmError::Configuration(message) => ApplicationError::Configuration(message),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}
