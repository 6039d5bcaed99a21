//! Content-addressed synthesized-audio cache
//!
//! Identical output text in the same language always synthesizes to the
//! same speech, so audio is cached on disk under a hash of the normalized
//! text and the language. Every operation is best-effort: any filesystem
//! error reads as a miss or a dropped write, never as a request failure.

use std::path::{Path, PathBuf};

use application::ports::AudioCachePort;
use application::text::normalize_utterance;
use async_trait::async_trait;
use domain::LanguageCode;
use tracing::{debug, warn};

/// Separator between text and language in the hashed key
const KEY_SEPARATOR: u8 = 0x1f;

/// Filesystem-backed audio cache
#[derive(Debug, Clone)]
pub struct FsAudioCache {
    dir: PathBuf,
}

impl FsAudioCache {
    /// Create a cache rooted at the given directory
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, text: &str, language: &LanguageCode) -> PathBuf {
        let mut hasher = blake3::Hasher::new();
        hasher.update(normalize_utterance(text).as_bytes());
        hasher.update(&[KEY_SEPARATOR]);
        hasher.update(language.as_str().as_bytes());
        self.dir.join(format!("{}.mp3", hasher.finalize().to_hex()))
    }
}

#[async_trait]
impl AudioCachePort for FsAudioCache {
    async fn lookup(&self, text: String, language: LanguageCode) -> Option<Vec<u8>> {
        let path = self.entry_path(&text, &language);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "Audio cache hit");
                Some(bytes)
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
            Err(error) => {
                warn!(path = %path.display(), %error, "Audio cache read failed, treating as miss");
                None
            }
        }
    }

    async fn store(&self, text: String, language: LanguageCode, audio: Vec<u8>) {
        let path = self.entry_path(&text, &language);
        if let Err(error) = tokio::fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), %error, "Could not create audio cache directory");
            return;
        }
        match tokio::fs::write(&path, &audio).await {
            Ok(()) => debug!(path = %path.display(), bytes = audio.len(), "Audio cached"),
            Err(error) => {
                warn!(path = %path.display(), %error, "Audio cache write failed, dropping entry");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::parse(code).unwrap()
    }

    fn cache() -> (tempfile::TempDir, FsAudioCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = FsAudioCache::new(dir.path().join("audio"));
        (dir, cache)
    }

    #[tokio::test]
    async fn store_then_lookup_round_trips() {
        let (_dir, cache) = cache();
        cache
            .store("Hello there".to_string(), lang("en"), vec![1, 2, 3])
            .await;
        let hit = cache.lookup("Hello there".to_string(), lang("en")).await;
        assert_eq!(hit, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn lookup_normalizes_the_text() {
        let (_dir, cache) = cache();
        cache
            .store("Good morning!".to_string(), lang("en"), vec![9])
            .await;
        let hit = cache.lookup("  good morning  ".to_string(), lang("en")).await;
        assert_eq!(hit, Some(vec![9]));
    }

    #[tokio::test]
    async fn language_is_part_of_the_key() {
        let (_dir, cache) = cache();
        cache.store("hola".to_string(), lang("es"), vec![5]).await;
        assert!(cache.lookup("hola".to_string(), lang("en")).await.is_none());
        assert!(cache.lookup("hola".to_string(), lang("es")).await.is_some());
    }

    #[tokio::test]
    async fn redundant_store_is_idempotent() {
        let (_dir, cache) = cache();
        cache.store("hola".to_string(), lang("es"), vec![1]).await;
        cache.store("hola".to_string(), lang("es"), vec![2]).await;
        let hit = cache.lookup("hola".to_string(), lang("es")).await;
        assert_eq!(hit, Some(vec![2]));
    }

    #[tokio::test]
    async fn storing_never_touches_unrelated_keys() {
        let (_dir, cache) = cache();
        cache.store("hola".to_string(), lang("es"), vec![1]).await;
        cache.store("adiós".to_string(), lang("es"), vec![2]).await;
        let first = cache.lookup("hola".to_string(), lang("es")).await;
        assert_eq!(first, Some(vec![1]));
    }

    #[tokio::test]
    async fn missing_directory_reads_as_miss() {
        let cache = FsAudioCache::new("/nonexistent/audio-cache");
        assert!(cache.lookup("hola".to_string(), lang("es")).await.is_none());
    }

    #[tokio::test]
    async fn entries_land_under_the_cache_dir_as_mp3() {
        let (_dir, cache) = cache();
        cache.store("adiós".to_string(), lang("es"), vec![7]).await;
        let files: Vec<_> = std::fs::read_dir(cache.dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension().and_then(|e| e.to_str()), Some("mp3"));
    }
}
