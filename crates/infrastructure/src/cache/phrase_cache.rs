//! Static phrase dictionary
//!
//! The highest-traffic utterances in a travel-interpreter workload are a
//! small fixed set of greetings and survival phrases. Serving them from a
//! bundled dictionary skips the translation model entirely. Entries are
//! keyed on the normalized utterance and the exact language pair; there is
//! no fuzzy matching and no runtime mutation.

use std::collections::HashMap;

use application::ports::PhraseCachePort;
use application::text::normalize_utterance;
use domain::LanguagePair;
use serde::Deserialize;
use tracing::info;

/// Dictionary shipped with the binary
const BUNDLED_PHRASES: &str = include_str!("../../data/common_phrases.json");

#[derive(Debug, Deserialize)]
struct PhraseEntry {
    from: String,
    to: String,
    phrase: String,
    translation: String,
}

/// In-memory phrase dictionary
#[derive(Debug)]
pub struct StaticPhraseCache {
    entries: HashMap<(String, String), String>,
}

impl StaticPhraseCache {
    /// Load the dictionary bundled with the binary
    ///
    /// # Errors
    ///
    /// Returns a parse error if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json_str(BUNDLED_PHRASES)
    }

    /// Parse a dictionary from JSON
    ///
    /// Phrases are normalized at load time with the same rules applied to
    /// lookups, so dictionary authors do not have to pre-normalize.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: Vec<PhraseEntry> = serde_json::from_str(json)?;
        let entries: HashMap<(String, String), String> = parsed
            .into_iter()
            .map(|e| {
                (
                    (normalize_utterance(&e.phrase), format!("{}->{}", e.from, e.to)),
                    e.translation,
                )
            })
            .collect();
        info!(phrases = entries.len(), "Phrase dictionary loaded");
        Ok(Self { entries })
    }

    /// Number of loaded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PhraseCachePort for StaticPhraseCache {
    fn lookup(&self, text: &str, languages: &LanguagePair) -> Option<String> {
        let key = (normalize_utterance(text), languages.to_string());
        self.entries.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(from: &str, to: &str) -> LanguagePair {
        LanguagePair::parse(from, to).unwrap()
    }

    #[test]
    fn bundled_dictionary_parses() {
        let cache = StaticPhraseCache::bundled().unwrap();
        assert!(!cache.is_empty());
    }

    #[test]
    fn lookup_ignores_case_and_edge_punctuation() {
        let cache = StaticPhraseCache::bundled().unwrap();
        let hit = cache.lookup("  ¡GRACIAS!  ", &pair("es", "en"));
        assert_eq!(hit.as_deref(), Some("Thank you"));
    }

    #[test]
    fn interior_punctuation_is_part_of_the_key() {
        let cache = StaticPhraseCache::bundled().unwrap();
        let hit = cache.lookup("Hola, ¿dónde está el baño?", &pair("es", "en"));
        assert_eq!(hit.as_deref(), Some("Hello, where is the bathroom?"));
    }

    #[test]
    fn pair_direction_matters() {
        let cache = StaticPhraseCache::bundled().unwrap();
        assert!(cache.lookup("gracias", &pair("es", "en")).is_some());
        assert!(cache.lookup("gracias", &pair("en", "es")).is_none());
        assert!(cache.lookup("gracias", &pair("es", "de")).is_none());
    }

    #[test]
    fn unknown_phrase_misses() {
        let cache = StaticPhraseCache::bundled().unwrap();
        assert!(
            cache
                .lookup("el ornitorrinco nada en el río", &pair("es", "en"))
                .is_none()
        );
    }

    #[test]
    fn custom_dictionary_loads() {
        let cache = StaticPhraseCache::from_json_str(
            r#"[{ "from": "it", "to": "en", "phrase": "Ciao!", "translation": "Hello" }]"#,
        )
        .unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.lookup("ciao", &pair("it", "en")).as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(StaticPhraseCache::from_json_str("not json").is_err());
    }
}
