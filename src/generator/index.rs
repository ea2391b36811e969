//! `<sitemapindex>` rendering.

use super::escape_xml;
use super::sitemap::SITEMAP_NS;
use crate::utils::date::DateTimeUtc;

struct IndexEntry {
    path: String,
    lastmod: DateTimeUtc,
}

/// A sitemap index listing child sitemaps by absolute URL.
pub struct SitemapIndex<'a> {
    base_url: &'a str,
    entries: Vec<IndexEntry>,
}

impl<'a> SitemapIndex<'a> {
    pub fn new(base_url: &'a str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/'),
            entries: Vec::new(),
        }
    }

    /// Add a child sitemap by its site-relative path (`/sitemap-en.xml`).
    pub fn push(&mut self, path: impl Into<String>, lastmod: DateTimeUtc) {
        self.entries.push(IndexEntry {
            path: path.into(),
            lastmod,
        });
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.entries.len() * 128);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<sitemapindex xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.entries {
            let loc = format!("{}{}", self.base_url, entry.path);
            xml.push_str("  <sitemap>\n    <loc>");
            xml.push_str(&escape_xml(&loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&entry.lastmod.to_rfc3339());
            xml.push_str("</lastmod>\n  </sitemap>\n");
        }

        xml.push_str("</sitemapindex>\n");
        xml
    }
}
