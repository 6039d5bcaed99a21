//! Language code and language pair value objects

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A two-letter ISO 639-1 language code, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and validate a language code (e.g. "es", "EN")
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let code = code.trim().to_lowercase();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase()) {
            Ok(Self(code))
        } else {
            Err(DomainError::InvalidLanguageCode(code))
        }
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// A directed source → target language pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Source language
    pub from: LanguageCode,
    /// Target language
    pub to: LanguageCode,
}

impl LanguagePair {
    /// Build a pair from raw codes
    pub fn parse(from: &str, to: &str) -> Result<Self, DomainError> {
        Ok(Self {
            from: LanguageCode::parse(from)?,
            to: LanguageCode::parse(to)?,
        })
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}
