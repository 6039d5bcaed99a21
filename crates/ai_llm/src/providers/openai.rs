//! OpenAI GPT-4o chat provider

use async_trait::async_trait;
use tracing::instrument;

use super::openai_compat::ChatCompletionsClient;
use crate::config::ChatProviderConfig;
use crate::error::LlmError;
use crate::ports::{ChatMessage, ChatModel};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4o";

/// OpenAI chat-completion provider (gpt-4o)
#[derive(Debug, Clone)]
pub struct OpenAiChatProvider {
    client: ChatCompletionsClient,
}

impl OpenAiChatProvider {
    /// Create a new OpenAI provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Configuration` if the configuration is invalid.
    pub fn new(config: ChatProviderConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Configuration)?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client =
            ChatCompletionsClient::new(base_url, config.api_key, MODEL, None, config.timeout_ms)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ChatModel for OpenAiChatProvider {
    #[instrument(skip(self, system_prompt, messages), fields(messages = messages.len()))]
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        self.client.complete(system_prompt, messages).await
    }

    fn engine_name(&self) -> &'static str {
        "gpt-4o"
    }
}
