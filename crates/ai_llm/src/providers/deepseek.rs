//! DeepSeek chat provider
//!
//! DeepSeek is API-compatible with OpenAI; only the base URL, model name,
//! and the vendor-recommended sampling temperature differ.

use async_trait::async_trait;
use tracing::instrument;

use super::openai_compat::ChatCompletionsClient;
use crate::config::ChatProviderConfig;
use crate::error::LlmError;
use crate::ports::{ChatMessage, ChatModel};

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
const MODEL: &str = "deepseek-chat";

// DeepSeek recommends a higher temperature for translation workloads.
const TEMPERATURE: f32 = 1.3;

/// DeepSeek chat-completion provider
#[derive(Debug, Clone)]
pub struct DeepseekChatProvider {
    client: ChatCompletionsClient,
}

impl DeepseekChatProvider {
    /// Create a new DeepSeek provider
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Configuration` if the configuration is invalid.
    pub fn new(config: ChatProviderConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Configuration)?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = ChatCompletionsClient::new(
            base_url,
            config.api_key,
            MODEL,
            Some(TEMPERATURE),
            config.timeout_ms,
        )?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ChatModel for DeepseekChatProvider {
    #[instrument(skip(self, system_prompt, messages), fields(messages = messages.len()))]
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        self.client.complete(system_prompt, messages).await
    }

    fn engine_name(&self) -> &'static str {
        "deepseek-chat"
    }
}
