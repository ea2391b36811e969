//! Page discovery.
//!
//! Enumerates every page the site serves and pairs the English and Spanish
//! variants of the same logical page.
//!
//! ```text
//! route source ──► ManifestEntry* ──► normalize ──► classify ──► pair
//!  (manifest file      (raw rows)       (path,        (type)      (route id →
//!   or routes tree)                      language)                 LanguagePair)
//! ```
//!
//! Every run recomputes the result from the route source; nothing is cached.

mod error;
mod manifest;
mod scan;

pub use error::DiscoveryError;
pub use manifest::{ManifestEntry, ManifestFormat, RouteManifest};
pub use scan::scan_routes;

use crate::config::{DiscoveryConfig, RouteSource};
use crate::debug;
use crate::page::{ClassifyRule, DiscoveredPage, Language, LanguagePair, classify, route};
use crate::utils::date::DateTimeUtc;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// A manifest row that could not become a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

/// Result of one discovery run.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pairs: BTreeMap<String, LanguagePair>,
    skipped: Vec<SkippedEntry>,
    duplicates: Vec<DiscoveredPage>,
    discovered_at: DateTimeUtc,
}

/// Run discovery against the configured route source.
pub fn discover(config: &DiscoveryConfig) -> Result<Discovery, DiscoveryError> {
    let entries = load_entries(config)?;
    let discovery = Discovery::from_entries(entries, config, DateTimeUtc::now());

    debug!(
        "discover";
        "{} pairs ({} pages), {} skipped, {} duplicates",
        discovery.len(),
        discovery.page_count(),
        discovery.skipped.len(),
        discovery.duplicates.len()
    );
    Ok(discovery)
}

/// Read raw entries from the configured route source.
pub fn load_entries(config: &DiscoveryConfig) -> Result<Vec<ManifestEntry>, DiscoveryError> {
    match config.source().ok_or(DiscoveryError::NoSource)? {
        RouteSource::Manifest(path) => Ok(RouteManifest::load(path)?.pages),
        RouteSource::Directory(dir) => scan_routes(dir, &config.page_files),
    }
}

impl Discovery {
    /// Normalize, classify and pair raw entries.
    ///
    /// `now` is the timestamp given to pages whose source has none.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ManifestEntry>,
        config: &DiscoveryConfig,
        now: DateTimeUtc,
    ) -> Self {
        let slugs = SlugTable::new(&config.slugs);
        let mut discovery = Self::empty(now);

        for entry in entries {
            match resolve_entry(&entry, &config.rules, &slugs, now) {
                Ok((route_id, page)) => discovery.insert(route_id, page),
                Err(reason) => {
                    debug!("discover"; "skipping `{}`: {}", entry.path, reason);
                    discovery.skipped.push(SkippedEntry {
                        path: entry.path,
                        reason,
                    });
                }
            }
        }

        discovery
    }

    /// A discovery with no pages.
    pub fn empty(now: DateTimeUtc) -> Self {
        Self {
            pairs: BTreeMap::new(),
            skipped: Vec::new(),
            duplicates: Vec::new(),
            discovered_at: now,
        }
    }

    fn insert(&mut self, route_id: String, page: DiscoveredPage) {
        let pair = self
            .pairs
            .entry(route_id)
            .or_insert_with_key(|id| LanguagePair::new(id.clone()));

        if let Err(duplicate) = pair.insert(page) {
            debug!("discover"; "duplicate {} page `{}`", duplicate.language, duplicate.path);
            self.duplicates.push(duplicate);
        }
    }

    /// All pairs, ordered by route id.
    pub fn pairs(&self) -> impl Iterator<Item = &LanguagePair> {
        self.pairs.values()
    }

    pub fn pair(&self, route_id: &str) -> Option<&LanguagePair> {
        self.pairs.get(route_id)
    }

    /// All pages, ordered by route id, English before Spanish.
    pub fn pages(&self) -> impl Iterator<Item = &DiscoveredPage> {
        self.pairs().flat_map(LanguagePair::pages)
    }

    /// Pairs with exactly one side.
    pub fn orphans(&self) -> impl Iterator<Item = &LanguagePair> {
        self.pairs().filter(|pair| pair.missing().is_some())
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn duplicates(&self) -> &[DiscoveredPage] {
        &self.duplicates
    }

    pub fn discovered_at(&self) -> DateTimeUtc {
        self.discovered_at
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.pages().count()
    }
}

/// Spanish path → English path for translated slugs, normalized.
struct SlugTable(FxHashMap<String, String>);

impl SlugTable {
    fn new(raw: &BTreeMap<String, String>) -> Self {
        let map = raw
            .iter()
            .filter_map(|(es, en)| {
                Some((route::normalize_path(es).ok()?, route::normalize_path(en).ok()?))
            })
            .collect();
        Self(map)
    }

    /// Route id of a normalized path in the given language.
    fn route_id(&self, path: &str, language: Language) -> String {
        match language {
            Language::En => path.to_string(),
            Language::Es => self
                .0
                .get(path)
                .cloned()
                .unwrap_or_else(|| route::strip_language_prefix(path).to_string()),
        }
    }
}

/// Turn one entry into `(route id, page)`, or the reason it was rejected.
fn resolve_entry(
    entry: &ManifestEntry,
    rules: &[ClassifyRule],
    slugs: &SlugTable,
    now: DateTimeUtc,
) -> Result<(String, DiscoveredPage), String> {
    let path = route::normalize_path(&entry.path).map_err(|issue| issue.to_string())?;

    let language = route::language_of(&path);
    if let Some(declared) = entry.language
        && declared != language
    {
        return Err(format!(
            "declared language `{declared}` contradicts path prefix (`{language}`)"
        ));
    }

    if let Some(priority) = entry.priority
        && !(0.0..=1.0).contains(&priority)
    {
        return Err(format!("priority {priority} is outside 0.0..=1.0"));
    }

    let route_id = slugs.route_id(&path, language);
    let page_type = match entry.page_type {
        Some(page_type) => page_type,
        None => classify(&route_id, rules),
    };

    let page = DiscoveredPage {
        priority: entry.priority,
        changefreq: entry.changefreq,
        ..DiscoveredPage::new(
            path,
            language,
            page_type,
            entry.last_modified.unwrap_or(now),
        )
    };
    Ok((route_id, page))
}

/// Whether a page can appear as a `<loc>` at all.
pub fn is_emittable(page: &DiscoveredPage) -> bool {
    !page.page_type.is_dynamic()
}
