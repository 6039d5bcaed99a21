//! Application state shared across handlers

use std::sync::Arc;

use application::{ChatService, InterpreterService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Voice interpretation pipeline
    pub interpreter: Arc<InterpreterService>,
    /// Scenario chat service
    pub chat: Arc<ChatService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
