//! Cost-avoidance caches

pub mod audio_cache;
pub mod phrase_cache;

pub use audio_cache::FsAudioCache;
pub use phrase_cache::StaticPhraseCache;
