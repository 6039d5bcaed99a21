//! Vendor-specific speech providers

mod deepgram;
mod elevenlabs;
mod google;
mod whisper;

pub use deepgram::DeepgramSttProvider;
pub use elevenlabs::ElevenLabsTtsProvider;
pub use google::GoogleTtsProvider;
pub use whisper::WhisperSttProvider;
