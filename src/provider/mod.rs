// Provider abstraction for LLM translation backends
//
// Two interchangeable implementations of the same contract:
// - Gemini: chat-model style request against the Google generative API
// - Zhipu: single-turn chat completion against the bigmodel.cn API

pub mod gemini;
pub mod zhipu;

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;

pub use gemini::GeminiTranslator;
pub use zhipu::ZhipuTranslator;

/// Which of the two supported language pairs a request is translated along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    EnglishToChinese,
    ChineseToEnglish,
}

impl Direction {
    /// Swap source and target languages. Flipping twice returns the
    /// original direction.
    pub fn flip(self) -> Self {
        match self {
            Self::EnglishToChinese => Self::ChineseToEnglish,
            Self::ChineseToEnglish => Self::EnglishToChinese,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en-zh" | "en2zh" => Some(Self::EnglishToChinese),
            "zh-en" | "zh2en" => Some(Self::ChineseToEnglish),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnglishToChinese => write!(f, "en-zh"),
            Self::ChineseToEnglish => write!(f, "zh-en"),
        }
    }
}

/// Identifies a provider backend. Held by the selector alongside each
/// constructed instance so switching never needs runtime type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    Zhipu,
}

impl ProviderKind {
    pub fn other(self) -> Self {
        match self {
            Self::Gemini => Self::Zhipu,
            Self::Zhipu => Self::Gemini,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "Gemini"),
            Self::Zhipu => write!(f, "Zhipu"),
        }
    }
}

/// Main trait for translation backends.
///
/// One outbound network call per invocation, no retries, no caching.
/// Implementations are immutable after construction, so concurrent calls
/// on a shared instance are safe.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` along `direction`, returning the trimmed
    /// translated text.
    async fn translate(&self, text: &str, direction: Direction) -> Result<String>;

    /// Which backend this instance talks to.
    fn kind(&self) -> ProviderKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flip_is_involution() {
        assert_eq!(Direction::EnglishToChinese.flip().flip(), Direction::EnglishToChinese);
        assert_eq!(Direction::ChineseToEnglish.flip().flip(), Direction::ChineseToEnglish);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("en-zh"), Some(Direction::EnglishToChinese));
        assert_eq!(Direction::parse("ZH-EN"), Some(Direction::ChineseToEnglish));
        assert_eq!(Direction::parse("fr-de"), None);
    }

    #[test]
    fn test_kind_other_toggles() {
        assert_eq!(ProviderKind::Gemini.other(), ProviderKind::Zhipu);
        assert_eq!(ProviderKind::Zhipu.other(), ProviderKind::Gemini);
    }
}
