//! Cache ports - the two cost-avoidance tiers
//!
//! Both tiers are best-effort: a failed read is a miss and a failed write
//! is swallowed by the adapter. Neither port can surface an error into the
//! request path.

use async_trait::async_trait;
use domain::{LanguageCode, LanguagePair};
#[cfg(test)]
use mockall::automock;

/// Port for the static phrase dictionary
///
/// Lookups are keyed on the normalized utterance and the exact language
/// pair. The dictionary is read-only at runtime.
#[cfg_attr(test, automock)]
pub trait PhraseCachePort: Send + Sync {
    /// Look up a canned translation for the utterance
    fn lookup(&self, text: &str, languages: &LanguagePair) -> Option<String>;
}

/// Port for the content-addressed synthesized-audio cache
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioCachePort: Send + Sync {
    /// Look up cached audio for the output text
    async fn lookup(&self, text: String, language: LanguageCode) -> Option<Vec<u8>>;

    /// Store freshly synthesized audio
    ///
    /// Write failures are logged by the adapter and never propagated.
    async fn store(&self, text: String, language: LanguageCode, audio: Vec<u8>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_audio_cache_round_trip() {
        let mut mock = MockAudioCachePort::new();
        mock.expect_store().returning(|_, _, _| ());
        mock.expect_lookup()
            .returning(|_, _| Some(vec![0xff, 0xfb, 0x90]));

        let lang = LanguageCode::parse("en").unwrap();
        mock.store("hello".to_string(), lang.clone(), vec![0xff, 0xfb, 0x90])
            .await;
        let hit = mock.lookup("hello".to_string(), lang).await;
        assert_eq!(hit, Some(vec![0xff, 0xfb, 0x90]));
    }

    #[test]
    fn mock_phrase_cache_miss() {
        let mut mock = MockPhraseCachePort::new();
        mock.expect_lookup().returning(|_, _| None);

        let pair = LanguagePair::parse("es", "en").unwrap();
        assert!(mock.lookup("gibberish", &pair).is_none());
    }
}
