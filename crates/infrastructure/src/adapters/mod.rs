//! Adapters implementing the application ports over the vendor clients

pub mod llm;
pub mod speech;

pub use llm::ChatModelAdapter;
pub use speech::{SpeechToTextAdapter, TextToSpeechAdapter};
