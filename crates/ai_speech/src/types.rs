//! Audio and transcription types shared by the speech adapters

use serde::{Deserialize, Serialize};

/// Audio container format
///
/// The pipeline works in MP3 end to end; M4a covers mobile uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG layer 3
    Mp3,
    /// MPEG-4 audio (mobile recordings)
    M4a,
    /// Waveform audio
    Wav,
}

impl AudioFormat {
    /// MIME type for HTTP uploads
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::M4a => "audio/mp4",
            Self::Wav => "audio/wav",
        }
    }

    /// File extension without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Wav => "wav",
        }
    }
}

/// Raw audio bytes plus their format
#[derive(Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl std::fmt::Debug for AudioData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioData")
            .field("size_bytes", &self.data.len())
            .field("format", &self.format)
            .finish()
    }
}

impl AudioData {
    /// Wrap raw bytes
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// The audio format
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size in bytes
    pub const fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume into the raw bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Upload filename with the right extension
    pub fn filename(&self, stem: &str) -> String {
        format!("{stem}.{}", self.format.extension())
    }
}

/// Result of a transcription call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Language the vendor reported or was hinted
    pub language: Option<String>,
}

impl Transcription {
    /// Create a transcription with just text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    /// Attach the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
