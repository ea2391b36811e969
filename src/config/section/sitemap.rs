//! `[sitemap]` section configuration.
//!
//! ```toml
//! [sitemap]
//! changefreq = "weekly"
//! priority = 0.8
//! home_priority = 1.0
//! cache_control = "public, max-age=3600, s-maxage=86400"
//! minify = false
//!
//! [sitemap.hreflang]
//! pages = ["/", "/about", "/contact"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::page::{ChangeFreq, route};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Default `<changefreq>` for pages without an override.
    pub changefreq: ChangeFreq,
    /// Default `<priority>` for pages without an override.
    pub priority: f32,
    /// `<priority>` of the home pages (`/`, `/es`).
    pub home_priority: f32,
    /// `Cache-Control` header sent with every sitemap response.
    pub cache_control: String,
    /// Strip indentation from written/served XML.
    pub minify: bool,
    pub hreflang: HreflangConfig,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            changefreq: ChangeFreq::Weekly,
            priority: 0.8,
            home_priority: 1.0,
            cache_control: "public, max-age=3600, s-maxage=86400".to_string(),
            minify: false,
            hreflang: HreflangConfig::default(),
        }
    }
}

/// `[sitemap.hreflang]`: the fixed page list of `/hreflang-sitemap.xml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HreflangConfig {
    /// English-side paths (route ids) to annotate.
    pub pages: Vec<String>,
}

impl Default for HreflangConfig {
    fn default() -> Self {
        Self {
            pages: [
                "/",
                "/about",
                "/practice-areas",
                "/attorneys",
                "/contact",
                "/blog",
                "/resources",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl SitemapConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (FieldPath::new("sitemap.priority"), self.priority),
            (FieldPath::new("sitemap.home_priority"), self.home_priority),
        ] {
            if !(0.0..=1.0).contains(&value) {
                diag.error(field, format!("{value} is outside 0.0..=1.0"));
            }
        }

        for page in &self.hreflang.pages {
            if let Err(err) = route::normalize_path(page) {
                diag.error(
                    FieldPath::new("sitemap.hreflang.pages"),
                    format!("`{page}`: {err}"),
                );
            }
        }
    }
}
