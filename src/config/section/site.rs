//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! url = "https://example-law.com"   # Base URL prepended to every <loc>
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

const URL_FIELD: FieldPath = FieldPath::new("site.url");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public base URL of the site.
    pub url: Option<String>,
}

impl SiteSectionConfig {
    /// Base URL without trailing slash (empty when unset).
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }

    pub fn validate(&self, require_url: bool, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = &self.url else {
            if require_url {
                diag.error_with_hint(
                    URL_FIELD,
                    "sitemaps need absolute URLs but no base URL is configured",
                    "set site.url, e.g.: \"https://example.com\", or pass --site-url",
                );
            }
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        URL_FIELD,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error(URL_FIELD, "URL has no host");
                }
                if parsed.query().is_some() || parsed.fragment().is_some() {
                    diag.error(URL_FIELD, "URL must not carry a query string or fragment");
                }
            }
            Err(err) => {
                diag.error_with_hint(
                    URL_FIELD,
                    format!("invalid URL '{url_str}': {err}"),
                    "use format like https://example.com",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(url: Option<&str>, require_url: bool) -> usize {
        let site = SiteSectionConfig {
            url: url.map(str::to_string),
        };
        let mut diag = ConfigDiagnostics::new();
        site.validate(require_url, &mut diag);
        diag.len()
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let site = SiteSectionConfig {
            url: Some("https://example.com/".into()),
        };
        assert_eq!(site.base_url(), "https://example.com");
        assert_eq!(SiteSectionConfig::default().base_url(), "");
    }

    #[test]
    fn test_validate_url() {
        assert_eq!(check(Some("https://example.com"), true), 0);
        assert_eq!(check(Some("ftp://example.com"), true), 1);
        assert_eq!(check(Some("not a url"), true), 1);
        assert_eq!(check(Some("https://example.com/?a=1"), true), 1);
    }

    #[test]
    fn test_validate_missing_url() {
        assert_eq!(check(None, true), 1);
        assert_eq!(check(None, false), 0);
    }
}
