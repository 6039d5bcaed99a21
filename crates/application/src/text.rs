//! Utterance normalization
//!
//! Both cache tiers key on the same normalized form, so a transcript that
//! differs only in casing, surrounding whitespace, or edge punctuation
//! still hits. Interior punctuation is meaningful and kept.

/// Punctuation stripped from the edges of an utterance
const EDGE_PUNCTUATION: &[char] = &['¿', '?', '¡', '!', '.', ',', ';', ':'];

/// Normalize an utterance for cache keying
pub fn normalize_utterance(text: &str) -> String {
    text.trim()
        .trim_matches(EDGE_PUNCTUATION)
        .trim()
        .to_lowercase()
}
