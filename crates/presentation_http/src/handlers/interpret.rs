//! Voice interpretation handler
//!
//! Audio travels base64-encoded inside JSON in both directions. A missing
//! `audio_base64` in the response is not an error: when every synthesis
//! engine is down the text results still come back with `audio_available`
//! set to false.

use axum::{Json, extract::State};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use domain::{LanguagePair, StackId, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use application::InterpretRequest;

use crate::{error::ApiError, state::AppState};

/// Interpretation request body
#[derive(Debug, Deserialize)]
pub struct InterpretBody {
    /// Base64-encoded audio upload
    pub audio_base64: String,
    /// Language the user spoke
    pub from_lang: String,
    /// Language to interpret into
    pub to_lang: String,
    /// Stable user identifier, if the caller is identified
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Interpretation response body
#[derive(Debug, Serialize)]
pub struct InterpretResponse {
    /// What the user said
    pub original_text: String,
    /// The translation
    pub translated_text: String,
    /// Base64-encoded speech, absent when synthesis was unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    /// Whether spoken output is included
    pub audio_available: bool,
    /// Stack the request was routed to
    pub stack: StackId,
    /// Whether the phrase cache served the translation
    pub cache_hit: bool,
}

/// Handle an interpretation request
#[instrument(skip_all, fields(from = %body.from_lang, to = %body.to_lang))]
pub async fn interpret(
    State(state): State<AppState>,
    Json(body): Json<InterpretBody>,
) -> Result<Json<InterpretResponse>, ApiError> {
    let audio = BASE64
        .decode(&body.audio_base64)
        .map_err(|e| ApiError::UnprocessableEntity(format!("invalid audio_base64: {e}")))?;

    let languages = LanguagePair::parse(&body.from_lang, &body.to_lang)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let user_id = body
        .user_id
        .map(UserId::new)
        .transpose()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let outcome = state
        .interpreter
        .interpret(InterpretRequest {
            audio,
            languages,
            user_id,
        })
        .await?;

    let audio_available = outcome.audio_available();
    Ok(Json(InterpretResponse {
        original_text: outcome.original_text,
        translated_text: outcome.translated_text,
        audio_base64: outcome.audio.map(|bytes| BASE64.encode(bytes)),
        audio_available,
        stack: outcome.stack,
        cache_hit: outcome.cache_hit,
    }))
}
