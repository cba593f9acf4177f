//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language used for operator-facing text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Every supported language
    pub const ALL: [Language; 2] = [Language::Russian, Language::English];

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }

    /// The word for "code" as it appears in message bodies
    pub fn code_label(&self) -> &'static str {
        match self {
            Language::Russian => "код",
            Language::English => "code",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" | "rus" | "russian" | "русский" => Ok(Language::Russian),
            "en" | "eng" | "english" => Ok(Language::English),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
