//! Port definitions - interfaces implemented by infrastructure adapters

pub mod cache_ports;
pub mod llm_port;
pub mod speech_ports;
pub mod usage_store;

pub use cache_ports::{AudioCachePort, PhraseCachePort};
pub use llm_port::{ChatRole, ChatTurn, LlmPort};
pub use speech_ports::{SttPort, TtsPort};
pub use usage_store::UsageStorePort;

#[cfg(test)]
pub use cache_ports::{MockAudioCachePort, MockPhraseCachePort};
#[cfg(test)]
pub use llm_port::MockLlmPort;
#[cfg(test)]
pub use speech_ports::{MockSttPort, MockTtsPort};
#[cfg(test)]
pub use usage_store::MockUsageStorePort;
