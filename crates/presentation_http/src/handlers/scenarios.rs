//! Scenario catalog handler

use axum::{Json, extract::State};
use serde::Serialize;

use application::Scenario;

use crate::state::AppState;

/// Scenario listing response
#[derive(Debug, Serialize)]
pub struct ScenariosResponse {
    pub scenarios: &'static [Scenario],
}

/// List the built-in practice scenarios
pub async fn list_scenarios(State(state): State<AppState>) -> Json<ScenariosResponse> {
    Json(ScenariosResponse {
        scenarios: state.chat.scenarios(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::ScenarioCatalog;

    #[test]
    fn listing_serializes_ids_without_prompts() {
        let resp = ScenariosResponse {
            scenarios: ScenarioCatalog.list(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        let first = &json["scenarios"][0];
        assert!(first.get("id").is_some());
        assert!(first.get("title").is_some());
        assert!(first.get("prompt").is_none());
    }
}
