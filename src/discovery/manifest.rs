//! Route manifest: the explicit list of pages a site serves.
//!
//! ```json
//! {
//!   "pages": [
//!     { "path": "/about" },
//!     { "path": "/es/sobre-nosotros", "last_modified": "2025-01-01" },
//!     { "path": "/blog/[slug]", "type": "dynamic" },
//!     { "path": "/", "priority": 1.0, "changefreq": "daily" }
//!   ]
//! }
//! ```
//!
//! The same shape is accepted as TOML (`[[pages]]` tables).

use super::DiscoveryError;
use crate::page::{ChangeFreq, Language, PageType};
use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One manifest row. Everything but `path` is optional; missing values are
/// inferred during discovery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTimeUtc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
}

impl ManifestEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub pages: Vec<ManifestEntry>,
}

/// Manifest serialization format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Result<Self, DiscoveryError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(DiscoveryError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl RouteManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, DiscoveryError> {
        let format = ManifestFormat::from_path(path)?;
        let content =
            fs::read_to_string(path).map_err(|err| DiscoveryError::Io(path.to_path_buf(), err))?;
        Self::parse(&content, format, path)
    }

    /// Parse manifest content. `origin` is only used in error messages.
    pub fn parse(content: &str, format: ManifestFormat, origin: &Path) -> Result<Self, DiscoveryError> {
        match format {
            ManifestFormat::Json => serde_json::from_str(content)
                .map_err(|err| DiscoveryError::Json(origin.to_path_buf(), err)),
            ManifestFormat::Toml => toml::from_str(content)
                .map_err(|err| DiscoveryError::Toml(origin.to_path_buf(), err)),
        }
    }

    /// Serialize for writing to disk.
    pub fn render(&self, format: ManifestFormat, pretty: bool) -> anyhow::Result<String> {
        let mut out = match (format, pretty) {
            (ManifestFormat::Json, true) => serde_json::to_string_pretty(self)?,
            (ManifestFormat::Json, false) => serde_json::to_string(self)?,
            (ManifestFormat::Toml, _) => toml::to_string_pretty(self)?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_manifest() {
        let json = r#"{
            "pages": [
                { "path": "/about" },
                { "path": "/es/about", "language": "es", "last_modified": "2025-01-01" },
                { "path": "/blog/post-1", "type": "blog", "priority": 0.5, "changefreq": "monthly" }
            ]
        }"#;
        let manifest = RouteManifest::parse(json, ManifestFormat::Json, Path::new("r.json")).unwrap();

        assert_eq!(manifest.pages.len(), 3);
        assert_eq!(manifest.pages[0], ManifestEntry::new("/about"));
        assert_eq!(manifest.pages[1].language, Some(Language::Es));
        assert_eq!(
            manifest.pages[1].last_modified,
            Some(DateTimeUtc::from_ymd(2025, 1, 1))
        );
        assert_eq!(manifest.pages[2].page_type, Some(PageType::Blog));
        assert_eq!(manifest.pages[2].changefreq, Some(ChangeFreq::Monthly));
    }

    #[test]
    fn test_parse_rfc3339_timestamps() {
        let json = r#"{
            "pages": [
                { "path": "/", "last_modified": "2025-01-01T12:00:00+02:00" },
                { "path": "/es", "last_modified": "2025-01-01T12:00:00.000Z" },
                { "path": "/about", "last_modified": "2025-01-01T01:00:00.25-03:30" }
            ]
        }"#;
        let manifest = RouteManifest::parse(json, ManifestFormat::Json, Path::new("r.json")).unwrap();
        let stamps: Vec<_> = manifest.pages.iter().map(|e| e.last_modified).collect();

        assert_eq!(
            stamps,
            vec![
                Some(DateTimeUtc::new(2025, 1, 1, 10, 0, 0)),
                Some(DateTimeUtc::new(2025, 1, 1, 12, 0, 0)),
                Some(DateTimeUtc::new(2025, 1, 1, 4, 30, 0)),
            ]
        );
    }

    #[test]
    fn test_parse_toml_manifest() {
        let toml = "[[pages]]\npath = \"/\"\n\n[[pages]]\npath = \"/es\"\ntype = \"static\"\n";
        let manifest = RouteManifest::parse(toml, ManifestFormat::Toml, Path::new("r.toml")).unwrap();
        assert_eq!(manifest.pages.len(), 2);
        assert_eq!(manifest.pages[1].page_type, Some(PageType::Static));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let json = r#"{ "pages": [ { "path": "/", "lang": "en" } ] }"#;
        let err = RouteManifest::parse(json, ManifestFormat::Json, Path::new("r.json")).unwrap_err();
        assert!(matches!(err, DiscoveryError::Json(..)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("routes.JSON")).unwrap(),
            ManifestFormat::Json
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("routes.toml")).unwrap(),
            ManifestFormat::Toml
        );
        assert!(matches!(
            ManifestFormat::from_path(Path::new("routes.yaml")),
            Err(DiscoveryError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = RouteManifest::load(&dir.path().join("routes.json")).unwrap_err();
        assert!(matches!(err, DiscoveryError::Io(..)));
    }

    #[test]
    fn test_render_is_loadable() {
        let manifest = RouteManifest {
            pages: vec![
                ManifestEntry::new("/"),
                ManifestEntry {
                    last_modified: Some(DateTimeUtc::new(2025, 3, 1, 12, 0, 0)),
                    ..ManifestEntry::new("/es")
                },
            ],
        };

        for format in [ManifestFormat::Json, ManifestFormat::Toml] {
            let text = manifest.render(format, true).unwrap();
            let parsed = RouteManifest::parse(&text, format, Path::new("out")).unwrap();
            assert_eq!(parsed, manifest);
        }
    }
}
