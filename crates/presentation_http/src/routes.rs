//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Interpretation API (v1)
        .route("/v1/interpret", post(handlers::interpret::interpret))
        // Chat API (v1)
        .route("/v1/chat", post(handlers::chat::chat))
        .route("/v1/scenarios", get(handlers::scenarios::list_scenarios))
        // Attach state
        .with_state(state)
}
