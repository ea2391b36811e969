//! Discovered page record.

use super::{Language, PageType};
use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a page is expected to change (`<changefreq>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page in one language, as found by discovery.
///
/// Built once per discovery run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveredPage {
    /// Normalized URL path, unique within its language.
    pub path: String,
    pub language: Language,
    #[serde(rename = "type")]
    pub page_type: PageType,
    /// Source timestamp, or the discovery time when the source has none.
    pub last_modified: DateTimeUtc,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
}

impl DiscoveredPage {
    pub fn new(
        path: impl Into<String>,
        language: Language,
        page_type: PageType,
        last_modified: DateTimeUtc,
    ) -> Self {
        Self {
            path: path.into(),
            language,
            page_type,
            last_modified,
            priority: None,
            changefreq: None,
        }
    }
}
