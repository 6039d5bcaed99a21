//! Cache tier configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the two cache tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory for the on-disk audio cache
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// Path to a custom phrase dictionary; `None` uses the bundled one
    #[serde(default)]
    pub phrase_file: Option<String>,
}

fn default_audio_dir() -> String {
    "audio-cache".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            phrase_file: None,
        }
    }
}
