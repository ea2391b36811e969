//! Static sitemap output.
//!
//! Runs discovery once, then renders every sitemap route in parallel and
//! writes each to `<output>/<file name>`.

use crate::{
    config::SiteConfig,
    debug,
    discovery::discover,
    generator::{RenderContext, SitemapRoute},
    log,
    utils::plural_count,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::PathBuf};

/// What a build produced.
#[derive(Debug)]
pub struct BuildSummary {
    pub files: Vec<PathBuf>,
    pub pages: usize,
    pub pairs: usize,
}

/// Write every sitemap document into the output directory.
pub fn build_sitemaps(config: &SiteConfig) -> Result<BuildSummary> {
    let discovery = discover(&config.discovery).context("page discovery failed")?;

    if discovery.is_empty() {
        log!("warning"; "no pages discovered, sitemaps will be empty");
    }
    for skipped in discovery.skipped() {
        log!("warning"; "skipped `{}`: {}", skipped.path, skipped.reason);
    }

    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    let ctx = RenderContext::new(config, discovery.discovered_at());
    let files = SitemapRoute::ALL
        .par_iter()
        .map(|&route| -> Result<PathBuf> {
            let xml = route.render(&ctx, Ok(&discovery))?;
            let path = output.join(route.file_name());
            fs::write(&path, xml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!("build"; "{}", config.root_relative(&path).display());
            Ok(path)
        })
        .collect::<Result<Vec<_>>>()?;

    let summary = BuildSummary {
        files,
        pages: discovery.page_count(),
        pairs: discovery.len(),
    };

    log!(
        "build";
        "wrote {} ({}, {}) to {}",
        plural_count(summary.files.len(), "sitemap"),
        plural_count(summary.pages, "page"),
        plural_count(summary.pairs, "pair"),
        config.root_relative(output).display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use crate::generator::check_well_formed;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> SiteConfig {
        let manifest = dir.path().join("routes.json");
        fs::write(
            &manifest,
            r#"{ "pages": [
                { "path": "/" },
                { "path": "/es" },
                { "path": "/about" },
                { "path": "/es/about" },
                { "path": "/blog/post-1" },
                { "path": "/blog/[slug]" }
            ] }"#,
        )
        .unwrap();

        let mut config = test_parse_config("[site]\nurl = \"https://law.example\"");
        config.root = dir.path().to_path_buf();
        config.discovery.manifest = Some(manifest);
        config.build.output = dir.path().join("public");
        config
    }

    #[test]
    fn test_build_writes_every_route() {
        let dir = TempDir::new().unwrap();
        let config = site(&dir);
        let summary = build_sitemaps(&config).unwrap();

        assert_eq!(summary.files.len(), SitemapRoute::ALL.len());
        assert_eq!(summary.pages, 6);
        assert_eq!(summary.pairs, 4);

        for route in SitemapRoute::ALL {
            let path = config.build.output.join(route.file_name());
            let xml = fs::read_to_string(&path).unwrap();
            check_well_formed(&xml).unwrap();
            assert!(!xml.contains("[slug]"), "{}", route);
        }

        let pages = fs::read_to_string(config.build.output.join("sitemap-pages.xml")).unwrap();
        assert_eq!(pages.matches("<url>").count(), 2);
    }

    #[test]
    fn test_build_fails_without_source() {
        let dir = TempDir::new().unwrap();
        let mut config = site(&dir);
        config.discovery.manifest = Some(dir.path().join("missing.json"));

        assert!(build_sitemaps(&config).is_err());
        assert!(!config.build.output.exists());
    }
}
