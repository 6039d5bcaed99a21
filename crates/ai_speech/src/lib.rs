//! Speech processing adapters
//!
//! Uniform Speech-to-Text and Text-to-Speech wrappers around the external
//! vendors the interpreter pipeline uses. Each adapter exposes exactly one
//! capability with a uniform input/output shape; vendor request and response
//! formats never leak past this crate.

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{DeepgramConfig, ElevenLabsConfig, GoogleTtsConfig, WhisperConfig};
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::{
    DeepgramSttProvider, ElevenLabsTtsProvider, GoogleTtsProvider, WhisperSttProvider,
};
pub use types::{AudioData, AudioFormat, Transcription};
