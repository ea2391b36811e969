//! `<urlset>` rendering.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://example.com/about</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.8</priority>
//!     <xhtml:link rel="alternate" hreflang="en" href="https://example.com/about"/>
//!     <xhtml:link rel="alternate" hreflang="es" href="https://example.com/es/about"/>
//!     <xhtml:link rel="alternate" hreflang="x-default" href="https://example.com/about"/>
//!   </url>
//! </urlset>
//! ```
//!
//! The `xmlns:xhtml` declaration and `<xhtml:link>` children only appear in
//! [`SitemapMode::Hreflang`].

use super::escape_xml;
use crate::config::SitemapConfig;
use crate::page::{Alternate, ChangeFreq, DiscoveredPage, route};
use crate::utils::date::DateTimeUtc;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapMode {
    Plain,
    Hreflang,
}

/// Values used when a page carries no override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryDefaults {
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub home_priority: f32,
}

impl Default for EntryDefaults {
    fn default() -> Self {
        Self::from(&SitemapConfig::default())
    }
}

impl From<&SitemapConfig> for EntryDefaults {
    fn from(config: &SitemapConfig) -> Self {
        Self {
            changefreq: config.changefreq,
            priority: config.priority,
            home_priority: config.home_priority,
        }
    }
}

impl EntryDefaults {
    /// Per-page override, then home priority, then the default.
    pub fn priority_of(&self, page: &DiscoveredPage) -> f32 {
        match page.priority {
            Some(priority) => priority,
            None if route::is_home(&page.path) => self.home_priority,
            None => self.priority,
        }
    }
}

/// One `<url>` element. Paths are site-relative; the base URL is joined at
/// render time.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub path: String,
    pub lastmod: DateTimeUtc,
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub alternates: Vec<Alternate>,
}

impl UrlEntry {
    pub fn from_page(page: &DiscoveredPage, defaults: &EntryDefaults) -> Self {
        Self {
            path: page.path.clone(),
            lastmod: page.last_modified,
            changefreq: page.changefreq.unwrap_or(defaults.changefreq),
            priority: defaults.priority_of(page),
            alternates: Vec::new(),
        }
    }

    pub fn with_alternates(mut self, alternates: Vec<Alternate>) -> Self {
        self.alternates = alternates;
        self
    }
}

/// A `<urlset>` document under construction.
#[derive(Debug)]
pub struct UrlSet<'a> {
    base_url: &'a str,
    mode: SitemapMode,
    urls: Vec<UrlEntry>,
}

impl<'a> UrlSet<'a> {
    pub fn new(base_url: &'a str, mode: SitemapMode) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/'),
            mode,
            urls: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: UrlEntry) {
        self.urls.push(entry);
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 256);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push('"');
        if self.mode == SitemapMode::Hreflang {
            xml.push_str(" xmlns:xhtml=\"");
            xml.push_str(XHTML_NS);
            xml.push('"');
        }
        xml.push_str(">\n");

        for entry in &self.urls {
            self.write_entry(&mut xml, entry);
        }

        xml.push_str("</urlset>\n");
        xml
    }

    fn write_entry(&self, xml: &mut String, entry: &UrlEntry) {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&self.absolute(&entry.path)));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(&entry.lastmod.to_rfc3339());
        xml.push_str("</lastmod>\n    <changefreq>");
        xml.push_str(entry.changefreq.as_str());
        xml.push_str("</changefreq>\n");
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));

        if self.mode == SitemapMode::Hreflang {
            for link in &entry.alternates {
                xml.push_str("    <xhtml:link rel=\"alternate\" hreflang=\"");
                xml.push_str(&escape_xml(link.hreflang));
                xml.push_str("\" href=\"");
                xml.push_str(&escape_xml(&self.absolute(&link.path)));
                xml.push_str("\"/>\n");
            }
        }

        xml.push_str("  </url>\n");
    }

    fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
