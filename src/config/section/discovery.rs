//! `[discovery]` section configuration.
//!
//! Names where the site's route structure comes from and how pages are
//! classified and paired.
//!
//! ```toml
//! [discovery]
//! manifest = "routes.json"          # explicit route manifest (JSON or TOML)
//! # routes_dir = "app"              # ...or a file-based routes tree
//! page_files = ["page.tsx", "page.mdx"]
//!
//! [[discovery.rules]]
//! contains = "/blog"
//! type = "blog"
//!
//! [discovery.slugs]
//! "/es/sobre-nosotros" = "/about"   # translated slug → English path
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::page::{ClassifyRule, Language, default_rules, route};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const SOURCE_FIELD: FieldPath = FieldPath::new("discovery");
const PAGE_FILES_FIELD: FieldPath = FieldPath::new("discovery.page_files");
const SLUGS_FIELD: FieldPath = FieldPath::new("discovery.slugs");
const RULES_FIELD: FieldPath = FieldPath::new("discovery.rules");

/// Where the route structure is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource<'a> {
    Manifest(&'a Path),
    Directory(&'a Path),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Route manifest file (`.json` or `.toml`).
    pub manifest: Option<PathBuf>,
    /// Root of a file-based routes tree.
    pub routes_dir: Option<PathBuf>,
    /// File names that mark a directory as a page.
    pub page_files: Vec<String>,
    /// Ordered classification rules, first match wins.
    pub rules: Vec<ClassifyRule>,
    /// Spanish paths whose slug differs from the English one.
    pub slugs: BTreeMap<String, String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            routes_dir: None,
            page_files: ["page.tsx", "page.ts", "page.jsx", "page.js", "page.mdx"]
                .map(String::from)
                .to_vec(),
            rules: default_rules(),
            slugs: BTreeMap::new(),
        }
    }
}

impl DiscoveryConfig {
    /// The configured source. A manifest takes precedence over a routes tree.
    pub fn source(&self) -> Option<RouteSource<'_>> {
        self.manifest
            .as_deref()
            .map(RouteSource::Manifest)
            .or_else(|| self.routes_dir.as_deref().map(RouteSource::Directory))
    }

    /// Resolve relative source paths against the project root.
    pub fn normalize(&mut self, root: &Path) {
        if let Some(manifest) = self.manifest.take() {
            self.manifest = Some(root.join(manifest));
        }
        if let Some(dir) = self.routes_dir.take() {
            self.routes_dir = Some(root.join(dir));
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match (&self.manifest, &self.routes_dir) {
            (None, None) => diag.error_with_hint(
                SOURCE_FIELD,
                "no route source configured",
                "set discovery.manifest = \"routes.json\" or discovery.routes_dir = \"app\"",
            ),
            (Some(_), Some(_)) => diag.error(
                SOURCE_FIELD,
                "discovery.manifest and discovery.routes_dir are mutually exclusive",
            ),
            _ => {}
        }

        if self.page_files.iter().all(|name| name.trim().is_empty()) {
            diag.error(PAGE_FILES_FIELD, "at least one page file name is required");
        }

        if self.rules.iter().any(|rule| rule.contains.is_empty()) {
            diag.error(RULES_FIELD, "rule `contains` must not be empty");
        }

        for (spanish, english) in &self.slugs {
            match (route::normalize_path(spanish), route::normalize_path(english)) {
                (Ok(es), Ok(en)) => {
                    if route::language_of(&es) != Language::Es {
                        diag.error(SLUGS_FIELD, format!("key `{spanish}` is not a Spanish path"));
                    }
                    if route::language_of(&en) != Language::En {
                        diag.error(SLUGS_FIELD, format!("value `{english}` is not an English path"));
                    }
                }
                (Err(err), _) => diag.error(SLUGS_FIELD, format!("key `{spanish}`: {err}")),
                (_, Err(err)) => diag.error(SLUGS_FIELD, format!("value `{english}`: {err}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::page::PageType;

    #[test]
    fn test_discovery_defaults() {
        let config = test_parse_config("");
        assert_eq!(
            config.discovery.source(),
            Some(RouteSource::Manifest(Path::new("routes.json")))
        );
        assert!(config.discovery.page_files.contains(&"page.tsx".to_string()));
        assert_eq!(config.discovery.rules, default_rules());
    }

    #[test]
    fn test_discovery_custom_rules_replace_defaults() {
        let config = test_parse_config(
            "[[discovery.rules]]\ncontains = \"/noticias\"\ntype = \"blog\"",
        );
        assert_eq!(
            config.discovery.rules,
            vec![ClassifyRule::new("/noticias", PageType::Blog)]
        );
    }

    #[test]
    fn test_discovery_slugs_table() {
        let config =
            test_parse_config("[discovery.slugs]\n\"/es/sobre-nosotros\" = \"/about\"");
        assert_eq!(
            config.discovery.slugs.get("/es/sobre-nosotros").map(String::as_str),
            Some("/about")
        );
    }

    #[test]
    fn test_validate_requires_one_source() {
        let mut diag = ConfigDiagnostics::new();
        DiscoveryConfig::default().validate(&mut diag);
        assert_eq!(diag.len(), 1);

        let both = DiscoveryConfig {
            manifest: Some("routes.json".into()),
            routes_dir: Some("app".into()),
            ..DiscoveryConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        both.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_validate_slug_directions() {
        let mut config = DiscoveryConfig {
            routes_dir: Some("app".into()),
            ..DiscoveryConfig::default()
        };
        config
            .slugs
            .insert("/about".to_string(), "/es/sobre-nosotros".to_string());
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_normalize_joins_root() {
        let mut config = DiscoveryConfig {
            routes_dir: Some("app".into()),
            ..DiscoveryConfig::default()
        };
        config.normalize(Path::new("/srv/site"));
        assert_eq!(
            config.source(),
            Some(RouteSource::Directory(Path::new("/srv/site/app")))
        );
    }
}
