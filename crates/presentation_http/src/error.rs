//! API error handling
//!
//! Maps pipeline errors onto classified JSON responses: invalid input is
//! the caller's fault (422), a failed pipeline stage is an upstream fault
//! (502) and carries the stage name so clients can tell a transcription
//! outage from a synthesis one.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    UnprocessableEntity(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Upstream failure: {message}")]
    UpstreamFailure {
        /// Pipeline stage that failed, when known
        stage: Option<&'static str>,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Pipeline stage that failed, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, stage, message) = match self {
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, None, msg),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                None,
                "Rate limit exceeded".to_string(),
            ),
            Self::UpstreamFailure { stage, message } => {
                (StatusCode::BAD_GATEWAY, stage, message)
            }
            Self::Internal(_) => {
                // Internal details stay in the logs.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    None,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            stage,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let stage = err.stage();
        match err {
            ApplicationError::Domain(e) => Self::UnprocessableEntity(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::UnprocessableEntity(msg),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::TranscriptionFailed(message)
            | ApplicationError::TranslationFailed(message)
            | ApplicationError::CompletionFailed(message)
            | ApplicationError::SynthesisFailed(message) => {
                Self::UpstreamFailure { stage, message }
            }
            ApplicationError::ExternalService(message) => Self::UpstreamFailure {
                stage: None,
                message,
            },
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_converts_to_unprocessable() {
        let source = ApplicationError::InvalidInput("empty audio".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::UnprocessableEntity(_)));
    }

    #[test]
    fn transcription_failure_carries_stage() {
        let source = ApplicationError::TranscriptionFailed("both engines down".to_string());
        let result: ApiError = source.into();
        let ApiError::UpstreamFailure { stage, .. } = result else {
            unreachable!("Expected UpstreamFailure");
        };
        assert_eq!(stage, Some("transcription"));
    }

    #[test]
    fn synthesis_failure_carries_stage() {
        let source = ApplicationError::SynthesisFailed("voice gone".to_string());
        let result: ApiError = source.into();
        let ApiError::UpstreamFailure { stage, .. } = result else {
            unreachable!("Expected UpstreamFailure");
        };
        assert_eq!(stage, Some("synthesis"));
    }

    #[test]
    fn external_service_has_no_stage() {
        let source = ApplicationError::ExternalService("dns".to_string());
        let result: ApiError = source.into();
        assert!(matches!(
            result,
            ApiError::UpstreamFailure { stage: None, .. }
        ));
    }

    #[test]
    fn rate_limited_converts() {
        let result: ApiError = ApplicationError::RateLimited.into();
        assert!(matches!(result, ApiError::RateLimited));
    }

    #[test]
    fn configuration_converts_to_internal() {
        let source = ApplicationError::Configuration("missing key".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[test]
    fn into_response_unprocessable_entity() {
        let err = ApiError::UnprocessableEntity("bad pair".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn into_response_upstream_failure() {
        let err = ApiError::UpstreamFailure {
            stage: Some("translation"),
            message: "down".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn into_response_rate_limited() {
        let response = ApiError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn into_response_internal() {
        let err = ApiError::Internal("secret detail".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_omits_missing_stage() {
        let resp = ErrorResponse {
            error: "bad".to_string(),
            stage: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("stage"));
    }

    #[test]
    fn error_response_includes_stage() {
        let resp = ErrorResponse {
            error: "down".to_string(),
            stage: Some("transcription"),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("transcription"));
    }
}
