//! Shared wire client for OpenAI-compatible chat completion APIs
//!
//! Both vendors speak `POST {base_url}/chat/completions` with the same
//! request and response shapes; only base URL, model, and sampling
//! parameters differ.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;
use crate::ports::ChatMessage;

/// Internal client for the chat completions wire protocol
#[derive(Debug, Clone)]
pub(super) struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: &'static str,
    temperature: Option<f32>,
}

impl ChatCompletionsClient {
    pub(super) fn new(
        base_url: String,
        api_key: String,
        model: &'static str,
        temperature: Option<f32>,
        timeout_ms: u64,
    ) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::Configuration("API key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
            temperature,
        })
    }

    pub(super) async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let mut wire_messages = Vec::with_capacity(messages.len() + 1);
        wire_messages.push(WireMessage {
            role: "system",
            content: system_prompt,
        });
        wire_messages.extend(messages.iter().map(|m| WireMessage {
            role: &m.role,
            content: &m.content,
        }));

        let body = CompletionRequest {
            model: self.model,
            messages: wire_messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
                return match api_error.error.code.as_deref() {
                    Some("rate_limit_exceeded") => Err(LlmError::RateLimited),
                    _ => Err(LlmError::CompletionFailed(api_error.error.message)),
                };
            }

            return Err(LlmError::CompletionFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("Response carried no choices".to_string()))?;

        debug!(model = self.model, content_len = content.len(), "Completion received");

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// OpenAI-style API error envelope
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}
