//! URL path normalization and language-neutral route ids.
//!
//! A route id is the English-side path of a page pair. Spanish paths map to
//! it by dropping the leading `/es` segment:
//!
//! ```text
//! /es            → /
//! /es/about      → /about
//! /espanol       → /espanol   (not a prefix segment, stays English)
//! ```

use super::Language;
use crate::utils::xml::is_xml_char;
use thiserror::Error;

/// Why a raw path was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathIssue {
    #[error("path is empty")]
    Empty,
    #[error("path contains whitespace")]
    Whitespace,
    #[error("path contains a query string or fragment")]
    QueryOrFragment,
    #[error("path contains a `.` or `..` segment")]
    DotSegment,
    #[error("path contains {0:?}, which XML cannot represent")]
    InvalidChar(char),
}

/// Normalize a page path: leading `/`, collapsed duplicate slashes, no
/// trailing `/` except for the root.
pub fn normalize_path(raw: &str) -> Result<String, PathIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathIssue::Empty);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(PathIssue::Whitespace);
    }
    if trimmed.contains(['?', '#']) {
        return Err(PathIssue::QueryOrFragment);
    }
    if let Some(c) = trimmed.chars().find(|&c| !is_xml_char(c)) {
        return Err(PathIssue::InvalidChar(c));
    }

    let mut normalized = String::with_capacity(trimmed.len() + 1);
    for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." {
            return Err(PathIssue::DotSegment);
        }
        normalized.push('/');
        normalized.push_str(segment);
    }

    if normalized.is_empty() {
        normalized.push('/');
    }
    Ok(normalized)
}

/// Language implied by a normalized path's prefix.
pub fn language_of(path: &str) -> Language {
    for lang in Language::ALL {
        if let Some(prefix) = lang.prefix()
            && has_prefix_segment(path, prefix)
        {
            return lang;
        }
    }
    Language::DEFAULT
}

/// Strip the language prefix segment from a normalized path.
pub fn strip_language_prefix(path: &str) -> &str {
    let lang = language_of(path);
    match lang.prefix() {
        Some(prefix) => match &path[prefix.len()..] {
            "" => "/",
            rest => rest,
        },
        None => path,
    }
}

/// Path of a route id in the given language (`/about` → `/es/about`).
pub fn localized_path(route_id: &str, lang: Language) -> String {
    match lang.prefix() {
        Some(prefix) if route_id == "/" => prefix.to_string(),
        Some(prefix) => format!("{prefix}{route_id}"),
        None => route_id.to_string(),
    }
}

/// Whether `path` is a home page (`/` or a bare language prefix).
pub fn is_home(path: &str) -> bool {
    strip_language_prefix(path) == "/"
}

fn has_prefix_segment(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
