//! File-based routes scan.
//!
//! Walks a routes tree where every page file marks a page whose URL is its
//! directory path:
//!
//! ```text
//! app/page.tsx                        → /
//! app/(marketing)/about/page.tsx      → /about        (route group dropped)
//! app/es/about/page.tsx               → /es/about
//! app/blog/[slug]/page.tsx            → /blog/[slug]  (dynamic)
//! app/api/leads/page.ts               → skipped
//! app/_components/page.tsx            → skipped
//! ```

use super::{DiscoveryError, ManifestEntry};
use crate::utils::date::DateTimeUtc;
use jwalk::WalkDir;
use std::io;
use std::path::Path;

/// Scan `root` for page files, producing manifest entries sorted by path.
pub fn scan_routes(root: &Path, page_files: &[String]) -> Result<Vec<ManifestEntry>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::Io(
            root.to_path_buf(),
            io::Error::new(io::ErrorKind::NotFound, "routes directory not found"),
        ));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).sort(true).skip_hidden(true) {
        let entry = entry.map_err(|err| DiscoveryError::Walk(root.to_path_buf(), err))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_page_file = entry
            .file_name()
            .to_str()
            .is_some_and(|name| page_files.iter().any(|f| f == name));
        if !is_page_file {
            continue;
        }

        let file = entry.path();
        let Some(path) = route_for_page_file(root, &file) else {
            continue;
        };

        let last_modified = entry
            .metadata()
            .map_err(|err| DiscoveryError::Walk(root.to_path_buf(), err))?
            .modified()
            .ok()
            .map(DateTimeUtc::from_system_time);

        entries.push(ManifestEntry {
            last_modified,
            ..ManifestEntry::new(path)
        });
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// URL path of a page file, or `None` when it is not routable.
fn route_for_page_file(root: &Path, file: &Path) -> Option<String> {
    let dir = file.parent()?.strip_prefix(root).ok()?;

    let mut path = String::new();
    for component in dir.components() {
        let segment = component.as_os_str().to_str()?;
        if is_route_group(segment) {
            continue;
        }
        if is_excluded_segment(segment) {
            return None;
        }
        path.push('/');
        path.push_str(segment);
    }

    if path.is_empty() {
        path.push('/');
    }
    Some(path)
}

/// `(group)` directories organize files without adding a URL segment.
fn is_route_group(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('(') && segment.ends_with(')')
}

/// Private folders, parallel-route slots and API handlers are not pages.
fn is_excluded_segment(segment: &str) -> bool {
    segment.starts_with('_') || segment.starts_with('@') || segment == "api"
}
