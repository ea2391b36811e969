//! The sitemap documents a site serves, and which pages each one lists.
//!
//! ```text
//! /sitemap.xml                  index of the child sitemaps
//! /sitemap-complete.xml         every page, hreflang-annotated
//! /sitemap-en.xml               English pages
//! /sitemap-es.xml               Spanish pages
//! /sitemap-blog.xml             type = blog
//! /sitemap-attorneys.xml        type = attorney
//! /sitemap-locations.xml        type = location
//! /sitemap-practice-areas.xml   type = practice-area
//! /sitemap-near-me.xml          type = near-me
//! /sitemap-pages.xml            static English pages outside /blog and /attorneys
//! /hreflang-sitemap.xml         fixed top-level pages, hreflang-annotated
//! ```
//!
//! Template (`dynamic`) pages never appear in any document.

use super::sitemap::{EntryDefaults, SitemapMode, UrlEntry, UrlSet};
use super::{SitemapIndex, minify_xml};
use crate::config::{SiteConfig, SitemapConfig};
use crate::discovery::{Discovery, DiscoveryError, is_emittable};
use crate::log;
use crate::page::{Alternate, DiscoveredPage, Language, PageType, X_DEFAULT, route};
use crate::utils::date::DateTimeUtc;
use anyhow::{Result, bail};
use std::error::Error;
use std::fmt;

/// Path fragments `/sitemap-pages.xml` never lists.
const PAGES_EXCLUDED_FRAGMENTS: [&str; 3] = ["/blog", "/attorneys", "/es/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SitemapRoute {
    Index,
    Complete,
    English,
    Spanish,
    Blog,
    Attorneys,
    Locations,
    PracticeAreas,
    NearMe,
    Pages,
    Hreflang,
}

impl SitemapRoute {
    pub const ALL: [Self; 11] = [
        Self::Index,
        Self::Complete,
        Self::English,
        Self::Spanish,
        Self::Blog,
        Self::Attorneys,
        Self::Locations,
        Self::PracticeAreas,
        Self::NearMe,
        Self::Pages,
        Self::Hreflang,
    ];

    /// Children listed by `/sitemap.xml`, in index order.
    pub const INDEX_CHILDREN: [Self; 8] = [
        Self::Complete,
        Self::Locations,
        Self::PracticeAreas,
        Self::Blog,
        Self::NearMe,
        Self::Attorneys,
        Self::English,
        Self::Spanish,
    ];

    pub const fn url_path(self) -> &'static str {
        match self {
            Self::Index => "/sitemap.xml",
            Self::Complete => "/sitemap-complete.xml",
            Self::English => "/sitemap-en.xml",
            Self::Spanish => "/sitemap-es.xml",
            Self::Blog => "/sitemap-blog.xml",
            Self::Attorneys => "/sitemap-attorneys.xml",
            Self::Locations => "/sitemap-locations.xml",
            Self::PracticeAreas => "/sitemap-practice-areas.xml",
            Self::NearMe => "/sitemap-near-me.xml",
            Self::Pages => "/sitemap-pages.xml",
            Self::Hreflang => "/hreflang-sitemap.xml",
        }
    }

    /// Output file name (`sitemap-en.xml`).
    pub fn file_name(self) -> &'static str {
        self.url_path().trim_start_matches('/')
    }

    pub fn from_url_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.url_path() == path)
    }

    /// `None` for the index, which is not a `<urlset>`.
    pub const fn mode(self) -> Option<SitemapMode> {
        match self {
            Self::Index => None,
            Self::Complete | Self::Hreflang => Some(SitemapMode::Hreflang),
            _ => Some(SitemapMode::Plain),
        }
    }

    pub const fn needs_discovery(self) -> bool {
        !matches!(self, Self::Index)
    }

    /// Whether a page-list route lists `page`.
    ///
    /// The index and the fixed hreflang list do not filter discovered pages
    /// and answer `false`.
    pub fn includes(self, page: &DiscoveredPage) -> bool {
        if !is_emittable(page) {
            return false;
        }
        match self {
            Self::Index | Self::Hreflang => false,
            Self::Complete => true,
            Self::English => page.language == Language::En,
            Self::Spanish => page.language == Language::Es,
            Self::Blog => page.page_type == PageType::Blog,
            Self::Attorneys => page.page_type == PageType::Attorney,
            Self::Locations => page.page_type == PageType::Location,
            Self::PracticeAreas => page.page_type == PageType::PracticeArea,
            Self::NearMe => page.page_type == PageType::NearMe,
            Self::Pages => {
                page.page_type == PageType::Static
                    && page.language == Language::En
                    && !PAGES_EXCLUDED_FRAGMENTS
                        .iter()
                        .any(|fragment| page.path.contains(fragment))
            }
        }
    }

    /// Render this route's document.
    ///
    /// Page-list routes fail when discovery failed. The hreflang route falls
    /// back to a homepage-only document instead, and the index ignores
    /// `discovery` entirely.
    pub fn render(
        self,
        ctx: &RenderContext<'_>,
        discovery: Result<&Discovery, &DiscoveryError>,
    ) -> Result<String> {
        let xml = match (self, discovery) {
            (Self::Index, _) => ctx.index_xml(),
            (Self::Hreflang, Ok(discovery)) => ctx.hreflang_xml(discovery),
            (Self::Hreflang, Err(err)) => {
                log!("warning"; "{}: serving homepage-only fallback ({})", self, ErrorChain(err));
                ctx.hreflang_fallback_xml()
            }
            (_, Ok(discovery)) => ctx.page_list_xml(self, discovery),
            (_, Err(err)) => bail!("page discovery failed: {}", ErrorChain(err)),
        };
        Ok(ctx.finish(xml))
    }
}

impl fmt::Display for SitemapRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url_path())
    }
}

/// Everything a render needs besides the discovered pages.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    base_url: &'a str,
    sitemap: &'a SitemapConfig,
    defaults: EntryDefaults,
    now: DateTimeUtc,
}

impl<'a> RenderContext<'a> {
    /// `now` stamps the index entries and the hreflang fallback.
    pub fn new(config: &'a SiteConfig, now: DateTimeUtc) -> Self {
        Self {
            base_url: config.site.base_url(),
            sitemap: &config.sitemap,
            defaults: EntryDefaults::from(&config.sitemap),
            now,
        }
    }

    fn finish(&self, xml: String) -> String {
        minify_xml(&xml, self.sitemap.minify).into_owned()
    }

    fn index_xml(&self) -> String {
        let mut index = SitemapIndex::new(self.base_url);
        for child in SitemapRoute::INDEX_CHILDREN {
            index.push(child.url_path(), self.now);
        }
        index.into_xml()
    }

    fn page_list_xml(&self, route: SitemapRoute, discovery: &Discovery) -> String {
        let mode = route.mode().unwrap_or(SitemapMode::Plain);
        let mut set = UrlSet::new(self.base_url, mode);

        for pair in discovery.pairs() {
            for page in pair.pages().filter(|page| route.includes(page)) {
                let entry = UrlEntry::from_page(page, &self.defaults);
                set.push(match mode {
                    SitemapMode::Hreflang => entry.with_alternates(emittable_alternates(pair)),
                    SitemapMode::Plain => entry,
                });
            }
        }
        set.into_xml()
    }

    fn hreflang_xml(&self, discovery: &Discovery) -> String {
        let mut set = UrlSet::new(self.base_url, SitemapMode::Hreflang);

        for route_id in &self.sitemap.hreflang.pages {
            let Ok(route_id) = route::normalize_path(route_id) else {
                continue;
            };
            let Some(pair) = discovery.pair(&route_id) else {
                continue;
            };
            let alternates = emittable_alternates(pair);
            for page in pair.pages().filter(|page| is_emittable(page)) {
                set.push(
                    UrlEntry::from_page(page, &self.defaults).with_alternates(alternates.clone()),
                );
            }
        }
        set.into_xml()
    }

    fn hreflang_fallback_xml(&self) -> String {
        let home = UrlEntry {
            path: "/".to_string(),
            lastmod: self.now,
            changefreq: self.defaults.changefreq,
            priority: self.defaults.home_priority,
            alternates: vec![
                Alternate {
                    hreflang: Language::En.code(),
                    path: route::localized_path("/", Language::En),
                },
                Alternate {
                    hreflang: Language::Es.code(),
                    path: route::localized_path("/", Language::Es),
                },
                Alternate {
                    hreflang: X_DEFAULT,
                    path: "/".to_string(),
                },
            ],
        };

        let mut set = UrlSet::new(self.base_url, SitemapMode::Hreflang);
        set.push(home);
        set.into_xml()
    }
}

/// A pair's alternates, minus template sides.
fn emittable_alternates(pair: &crate::page::LanguagePair) -> Vec<Alternate> {
    pair.alternates()
        .into_iter()
        .filter(|link| {
            pair.pages()
                .any(|page| page.path == link.path && is_emittable(page))
        })
        .collect()
}

/// `error: cause: cause` on one line.
struct ErrorChain<'a>(&'a DiscoveryError);

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, ": {cause}")?;
            source = cause.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiscoveryConfig, test_parse_config};
    use crate::discovery::ManifestEntry;
    use crate::generator::check_well_formed;
    use std::io;
    use std::path::PathBuf;

    const NOW: DateTimeUtc = DateTimeUtc::new(2025, 6, 1, 0, 0, 0);

    fn site() -> SiteConfig {
        test_parse_config("[site]\nurl = \"https://law.example\"")
    }

    fn discovery(entries: Vec<ManifestEntry>) -> Discovery {
        Discovery::from_entries(entries, &DiscoveryConfig::default(), NOW)
    }

    fn typed(path: &str, page_type: PageType) -> ManifestEntry {
        ManifestEntry {
            page_type: Some(page_type),
            ..ManifestEntry::new(path)
        }
    }

    /// The three-page site used throughout: `/about` in both languages and
    /// an English-only blog post.
    fn scenario() -> Discovery {
        discovery(vec![
            ManifestEntry::new("/about"),
            ManifestEntry::new("/es/about"),
            typed("/blog/post-1", PageType::Blog),
        ])
    }

    fn render(route: SitemapRoute, config: &SiteConfig, discovery: &Discovery) -> String {
        let ctx = RenderContext::new(config, NOW);
        let xml = route.render(&ctx, Ok(discovery)).unwrap();
        check_well_formed(&xml).unwrap();
        xml
    }

    fn io_failure() -> DiscoveryError {
        DiscoveryError::Io(
            PathBuf::from("routes.json"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        )
    }

    #[test]
    fn test_route_lookup() {
        for route in SitemapRoute::ALL {
            assert_eq!(SitemapRoute::from_url_path(route.url_path()), Some(route));
        }
        assert_eq!(SitemapRoute::from_url_path("/sitemap-fr.xml"), None);
        assert_eq!(SitemapRoute::Pages.file_name(), "sitemap-pages.xml");
        assert_eq!(SitemapRoute::Hreflang.file_name(), "hreflang-sitemap.xml");
    }

    #[test]
    fn test_pages_route_scenario() {
        let xml = render(SitemapRoute::Pages, &site(), &scenario());

        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<loc>https://law.example/about</loc>"));
    }

    #[test]
    fn test_hreflang_route_scenario() {
        let xml = render(SitemapRoute::Hreflang, &site(), &scenario());

        assert!(xml.contains("<loc>https://law.example/about</loc>"));
        assert!(xml.contains(
            r#"hreflang="en" href="https://law.example/about""#
        ));
        assert!(xml.contains(
            r#"hreflang="es" href="https://law.example/es/about""#
        ));
        assert!(xml.contains(
            r#"hreflang="x-default" href="https://law.example/about""#
        ));
        assert!(!xml.contains("post-1"));
    }

    #[test]
    fn test_pages_route_never_lists_excluded_paths() {
        let discovery = discovery(vec![
            ManifestEntry::new("/"),
            ManifestEntry::new("/es"),
            typed("/blog", PageType::Static),
            typed("/attorneys", PageType::Static),
            ManifestEntry::new("/es/contacto"),
            ManifestEntry::new("/contact"),
            ManifestEntry::new("/practice-areas/dwi"),
        ]);
        let xml = render(SitemapRoute::Pages, &site(), &discovery);

        for fragment in PAGES_EXCLUDED_FRAGMENTS {
            assert!(!xml.contains(&format!("https://law.example{fragment}")));
        }
        assert!(xml.contains("<loc>https://law.example/</loc>"));
        assert!(xml.contains("<loc>https://law.example/contact</loc>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_language_routes() {
        let config = site();
        let en = render(SitemapRoute::English, &config, &scenario());
        let es = render(SitemapRoute::Spanish, &config, &scenario());

        assert_eq!(en.matches("<url>").count(), 2);
        assert!(!en.contains("/es/"));
        assert_eq!(es.matches("<url>").count(), 1);
        assert!(es.contains("<loc>https://law.example/es/about</loc>"));
        assert!(!es.contains("xhtml"));
    }

    #[test]
    fn test_type_routes() {
        let discovery = discovery(vec![
            ManifestEntry::new("/blog/a"),
            ManifestEntry::new("/es/blog/a"),
            ManifestEntry::new("/attorneys/ana"),
            ManifestEntry::new("/locations/raleigh"),
            ManifestEntry::new("/practice-areas/dwi"),
            ManifestEntry::new("/dwi-lawyer-near-me"),
        ]);
        let config = site();
        let count = |route| render(route, &config, &discovery).matches("<url>").count();

        assert_eq!(count(SitemapRoute::Blog), 2);
        assert_eq!(count(SitemapRoute::Attorneys), 1);
        assert_eq!(count(SitemapRoute::Locations), 1);
        assert_eq!(count(SitemapRoute::PracticeAreas), 1);
        assert_eq!(count(SitemapRoute::NearMe), 1);
    }

    #[test]
    fn test_complete_route_is_hreflang_and_skips_templates() {
        let discovery = discovery(vec![
            ManifestEntry::new("/about"),
            ManifestEntry::new("/es/about"),
            ManifestEntry::new("/blog/post-1"),
            ManifestEntry::new("/blog/[slug]"),
            ManifestEntry::new("/es/blog/[slug]"),
        ]);
        let xml = render(SitemapRoute::Complete, &site(), &discovery);

        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(!xml.contains("[slug]"));
        assert!(xml.contains("xmlns:xhtml"));

        // English-only page: no Spanish link.
        let post = xml
            .split("</url>")
            .find(|block| block.contains("<loc>https://law.example/blog/post-1</loc>"))
            .unwrap();
        assert!(!post.contains(r#"hreflang="es""#));
        assert!(post.contains(r#"hreflang="x-default""#));
    }

    #[test]
    fn test_hreflang_route_only_existing_sides() {
        let discovery = discovery(vec![
            ManifestEntry::new("/"),
            ManifestEntry::new("/es"),
            ManifestEntry::new("/contact"),
            ManifestEntry::new("/unlisted"),
            ManifestEntry::new("/es/unlisted"),
        ]);
        let xml = render(SitemapRoute::Hreflang, &site(), &discovery);

        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(!xml.contains("unlisted"));
        assert!(!xml.contains("https://law.example/es/contact"));
        assert!(xml.contains(r#"hreflang="es" href="https://law.example/es""#));
    }

    #[test]
    fn test_hreflang_route_uses_configured_pages() {
        let mut config = site();
        config.sitemap.hreflang.pages = vec!["/unlisted/".to_string()];
        let discovery = discovery(vec![
            ManifestEntry::new("/"),
            ManifestEntry::new("/unlisted"),
        ]);
        let xml = render(SitemapRoute::Hreflang, &config, &discovery);
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<loc>https://law.example/unlisted</loc>"));
    }

    #[test]
    fn test_hreflang_fallback_on_discovery_failure() {
        let config = site();
        let ctx = RenderContext::new(&config, NOW);
        let err = io_failure();
        let xml = SitemapRoute::Hreflang.render(&ctx, Err(&err)).unwrap();

        check_well_formed(&xml).unwrap();
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<loc>https://law.example/</loc>"));
        assert!(xml.contains(r#"hreflang="en" href="https://law.example/""#));
        assert!(xml.contains(r#"hreflang="es" href="https://law.example/es""#));
        assert!(xml.contains(r#"hreflang="x-default" href="https://law.example/""#));
    }

    #[test]
    fn test_page_list_routes_fail_on_discovery_failure() {
        let config = site();
        let ctx = RenderContext::new(&config, NOW);
        let err = io_failure();

        for route in SitemapRoute::ALL {
            let result = route.render(&ctx, Err(&err));
            match route {
                SitemapRoute::Index | SitemapRoute::Hreflang => assert!(result.is_ok()),
                _ => {
                    let message = result.unwrap_err().to_string();
                    assert!(message.contains("routes.json"), "{message}");
                    assert!(message.contains("gone"), "{message}");
                }
            }
        }
    }

    #[test]
    fn test_index_lists_children() {
        let xml = render(SitemapRoute::Index, &site(), &scenario());

        assert!(xml.contains("<sitemapindex"));
        assert_eq!(xml.matches("<sitemap>").count(), 8);
        assert_eq!(
            xml.matches("<lastmod>2025-06-01T00:00:00Z</lastmod>").count(),
            8
        );
        for child in SitemapRoute::INDEX_CHILDREN {
            assert!(xml.contains(&format!("<loc>https://law.example{}</loc>", child.url_path())));
        }
        assert!(!xml.contains("sitemap-pages.xml"));
    }

    #[test]
    fn test_empty_discovery_renders_empty_urlsets() {
        let empty = discovery(Vec::new());
        for route in SitemapRoute::ALL {
            if route.needs_discovery() {
                let xml = render(route, &site(), &empty);
                assert!(!xml.contains("<url>"));
            }
        }
    }

    #[test]
    fn test_escaped_paths_stay_well_formed() {
        let discovery = discovery(vec![ManifestEntry::new("/fees&costs")]);
        for route in SitemapRoute::ALL {
            let xml = render(route, &site(), &discovery);
            assert!(!xml.contains("fees&costs"));
        }
        let xml = render(SitemapRoute::English, &site(), &discovery);
        assert!(xml.contains("<loc>https://law.example/fees&amp;costs</loc>"));
    }

    #[test]
    fn test_control_chars_never_reach_the_output() {
        let discovery = discovery(vec![
            ManifestEntry::new("/a\u{1}b"),
            ManifestEntry::new("/about"),
        ]);
        assert_eq!(discovery.skipped().len(), 1);
        assert_eq!(
            discovery.skipped()[0].reason,
            "path contains '\\u{1}', which XML cannot represent"
        );

        for route in SitemapRoute::ALL {
            let xml = render(route, &site(), &discovery);
            assert!(!xml.contains('\u{1}'), "{route}");
            check_well_formed(&xml).unwrap();
        }
    }

    #[test]
    fn test_minify_applies_to_every_route() {
        let mut config = site();
        config.sitemap.minify = true;
        for route in SitemapRoute::ALL {
            let xml = render(route, &config, &scenario());
            assert!(!xml.contains('\n'));
        }
    }
}
