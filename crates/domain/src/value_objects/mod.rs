//! Value objects for the interpreter domain

mod engines;
mod language;
mod provider_stack;
mod user_id;

pub use engines::{LlmEngine, SttEngine, TtsEngine};
pub use language::{LanguageCode, LanguagePair};
pub use provider_stack::{ProviderStack, StackId};
pub use user_id::UserId;
