//! Traffic-split configuration.

use serde::{Deserialize, Serialize};

/// A/B routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Share of identified traffic routed to the challenger stack, in `[0, 1]`
    #[serde(default = "default_challenger_ratio")]
    pub challenger_ratio: f64,
}

const fn default_challenger_ratio() -> f64 {
    0.5
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            challenger_ratio: default_challenger_ratio(),
        }
    }
}
