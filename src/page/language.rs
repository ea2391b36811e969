//! Site languages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language a page is served in.
///
/// English pages live at the root, Spanish pages under the `/es` prefix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    /// All languages in output order.
    pub const ALL: [Self; 2] = [Self::En, Self::Es];

    /// The language `x-default` points at.
    pub const DEFAULT: Self = Self::En;

    /// Hreflang / ISO 639-1 code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// URL prefix segment of this language (`None` for the root language).
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::En => None,
            Self::Es => Some("/es"),
        }
    }

    /// The other language of the pair.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::En => Self::Es,
            Self::Es => Self::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::Es.code(), "es");
    }

    #[test]
    fn test_counterpart() {
        assert_eq!(Language::En.counterpart(), Language::Es);
        assert_eq!(Language::Es.counterpart(), Language::En);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Es).unwrap(), "\"es\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
    }
}
