//! Language-model port - interface for translation and scenario chat

use async_trait::async_trait;
use domain::LanguagePair;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Role of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction (stripped from client payloads)
    System,
    /// End-user message
    User,
    /// Model reply
    Assistant,
}

/// One turn of a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who produced the turn
    pub role: ChatRole,
    /// Turn text
    pub content: String,
}

impl ChatTurn {
    /// Build a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Port for chat-completion language models
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    /// Translate text between the pair's languages
    ///
    /// # Returns
    /// The translated text only, no commentary
    async fn translate(
        &self,
        text: String,
        languages: LanguagePair,
    ) -> Result<String, ApplicationError>;

    /// Run a chat completion under the given system prompt
    async fn complete(
        &self,
        system_prompt: String,
        turns: Vec<ChatTurn>,
    ) -> Result<String, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let turn = ChatTurn::user("hi");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn system_role_deserializes() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"role":"system","content":"you are evil"}"#).unwrap();
        assert_eq!(turn.role, ChatRole::System);
    }

    #[tokio::test]
    async fn mock_llm_port_translates() {
        let mut mock = MockLlmPort::new();
        mock.expect_translate()
            .returning(|_, _| Ok("hello".to_string()));

        let pair = LanguagePair::parse("es", "en").unwrap();
        let text = mock.translate("hola".to_string(), pair).await.unwrap();
        assert_eq!(text, "hello");
    }
}
