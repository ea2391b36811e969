//! `lingomap validate`: check discovery results and rendered sitemaps.
//!
//! Errors: skipped manifest entries, documents that are not well-formed XML,
//! and (with `--strict`) pages without a translation. Everything else that
//! looks off is a warning.

mod report;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::discovery::{Discovery, discover};
use crate::generator::{RenderContext, SitemapRoute, check_well_formed};
use crate::log;
use crate::page::route;
use crate::utils::plural_count;

use report::ValidationReport;

pub fn validate_site(strict: bool, config: &SiteConfig) -> Result<()> {
    let discovery = discover(&config.discovery).context("page discovery failed")?;

    log!(
        "validate";
        "checking {} ({})",
        plural_count(discovery.len(), "pair"),
        plural_count(discovery.page_count(), "page")
    );

    let report = collect_report(&discovery, config, strict);
    report.print();

    if report.has_errors() {
        eprintln!();
        bail!("validation {}", report);
    }

    log!("validate"; "{}", report);
    Ok(())
}

fn collect_report(discovery: &Discovery, config: &SiteConfig, strict: bool) -> ValidationReport {
    let mut report = ValidationReport::default();

    for skipped in discovery.skipped() {
        report.add_error("entries", format!("`{}`", skipped.path), skipped.reason.clone());
    }

    for duplicate in discovery.duplicates() {
        report.add_warning(
            "duplicates",
            duplicate.path.clone(),
            format!("second {} page for the same route, ignored", duplicate.language),
        );
    }

    for pair in discovery.orphans() {
        let (Some(page), Some(missing)) = (pair.pages().next(), pair.missing()) else {
            continue;
        };
        let reason = format!("no `{missing}` counterpart");
        if strict {
            report.add_error("translations", page.path.clone(), reason);
        } else {
            report.add_warning("translations", page.path.clone(), reason);
        }
    }

    for listed in &config.sitemap.hreflang.pages {
        let found = route::normalize_path(listed)
            .ok()
            .and_then(|id| discovery.pair(&id))
            .is_some();
        if !found {
            report.add_warning("hreflang", listed.clone(), "listed but not discovered");
        }
    }

    let ctx = RenderContext::new(config, discovery.discovered_at());
    let xml_errors: Vec<_> = SitemapRoute::ALL
        .par_iter()
        .filter_map(|&route| {
            let checked = route
                .render(&ctx, Ok(discovery))
                .and_then(|xml| check_well_formed(&xml));
            checked.err().map(|err| (route, format!("{err:#}")))
        })
        .collect();
    for (route, reason) in xml_errors {
        report.add_error("xml", route.url_path(), reason);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::discovery::ManifestEntry;
    use crate::utils::date::DateTimeUtc;

    fn discovery(config: &SiteConfig, paths: &[&str]) -> Discovery {
        Discovery::from_entries(
            paths.iter().map(|p| ManifestEntry::new(*p)),
            &config.discovery,
            DateTimeUtc::from_ymd(2025, 1, 1),
        )
    }

    fn site() -> SiteConfig {
        let mut config = test_parse_config("[site]\nurl = \"https://law.example\"");
        config.sitemap.hreflang.pages = vec!["/".to_string(), "/about".to_string()];
        config
    }

    #[test]
    fn test_clean_site_passes() {
        let config = site();
        let discovery = discovery(&config, &["/", "/es", "/about", "/es/about"]);
        let report = collect_report(&discovery, &config, true);

        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_orphans_are_warnings_unless_strict() {
        let config = site();
        let discovery = discovery(&config, &["/", "/es", "/about", "/es/about", "/contact"]);

        let lenient = collect_report(&discovery, &config, false);
        assert!(!lenient.has_errors());
        assert_eq!(lenient.warnings["translations"][0].target, "/contact");
        assert_eq!(lenient.warnings["translations"][0].reason, "no `es` counterpart");

        let strict = collect_report(&discovery, &config, true);
        assert_eq!(strict.errors["translations"].len(), 1);
    }

    #[test]
    fn test_skipped_entries_are_errors() {
        let config = site();
        let discovery = discovery(&config, &["/", "/es", "/about", "/es/about", "/a b"]);
        let report = collect_report(&discovery, &config, false);

        assert_eq!(report.errors["entries"].len(), 1);
        assert!(!report.errors.contains_key("xml"));
    }

    #[test]
    fn test_missing_hreflang_pages_warn() {
        let config = site();
        let discovery = discovery(&config, &["/", "/es"]);
        let report = collect_report(&discovery, &config, false);

        assert_eq!(report.warnings["hreflang"][0].target, "/about");
    }
}
