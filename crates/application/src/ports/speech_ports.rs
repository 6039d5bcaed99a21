//! Speech ports - interfaces for speech-to-text and text-to-speech engines
//!
//! One port per capability, one adapter per vendor. The router selects
//! between adapters by engine identity; the ports themselves know nothing
//! about stacks or fallback order.

use async_trait::async_trait;
use domain::LanguageCode;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech-to-text engines
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SttPort: Send + Sync {
    /// Transcribe spoken audio to text
    ///
    /// # Arguments
    /// * `audio` - Raw audio bytes (mp3 or m4a as uploaded)
    /// * `language` - Language the speaker is expected to use
    ///
    /// # Returns
    /// The transcript, which may be empty for silence or noise
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        language: LanguageCode,
    ) -> Result<String, ApplicationError>;
}

/// Port for speech-synthesis engines
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TtsPort: Send + Sync {
    /// Synthesize speech for the given text
    ///
    /// # Returns
    /// Encoded audio bytes (mp3)
    async fn synthesize(
        &self,
        text: String,
        language: LanguageCode,
    ) -> Result<Vec<u8>, ApplicationError>;
}
