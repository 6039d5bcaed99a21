//! Scenario chat handler

use axum::{Json, extract::State};
use domain::{LanguagePair, StackId, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use application::{ChatRequest, ChatTurn};

use crate::{error::ApiError, state::AppState};

fn default_from_lang() -> String {
    "es".to_string()
}

fn default_to_lang() -> String {
    "en".to_string()
}

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    /// Conversation so far, oldest first
    pub messages: Vec<ChatTurn>,
    /// Scenario id; unknown or missing ids use the default tutor
    #[serde(default)]
    pub scenario_id: Option<String>,
    /// Language the learner speaks
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    /// Language the learner practices
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// Stable user identifier, if the caller is identified
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Always "assistant"
    pub role: &'static str,
    /// The model's reply
    pub content: String,
    /// Stack the request was routed to
    pub stack: StackId,
}

/// Handle one chat turn
#[instrument(skip_all, fields(turns = body.messages.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatResponse>, ApiError> {
    let languages = LanguagePair::parse(&body.from_lang, &body.to_lang)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let user_id = body
        .user_id
        .map(UserId::new)
        .transpose()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let reply = state
        .chat
        .chat(ChatRequest {
            messages: body.messages,
            scenario: body.scenario_id,
            languages,
            user_id,
        })
        .await?;

    Ok(Json(ChatResponse {
        role: "assistant",
        content: reply.reply,
        stack: reply.stack,
    }))
}
