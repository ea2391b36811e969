//! `lingomap manifest`: freeze a routes tree into a route manifest.
//!
//! The written file can replace `routes_dir` as the discovery source, e.g.
//! on hosts that deploy the built site without its source tree.

use crate::{
    config::SiteConfig,
    discovery::{ManifestFormat, RouteManifest, scan_routes},
    log,
    utils::plural_count,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    path::{Path, PathBuf},
};

const DEFAULT_MANIFEST: &str = "routes.json";

pub fn write_manifest(output: Option<&Path>, pretty: bool, config: &SiteConfig) -> Result<PathBuf> {
    let routes_dir = config
        .discovery
        .routes_dir
        .as_deref()
        .ok_or_else(|| anyhow!("discovery.routes_dir is not configured"))?;

    let path = config.root_join(output.unwrap_or(Path::new(DEFAULT_MANIFEST)));
    let format = ManifestFormat::from_path(&path)?;

    let manifest = RouteManifest {
        pages: scan_routes(routes_dir, &config.discovery.page_files)?,
    };
    let content = manifest.render(format, pretty)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;

    log!(
        "manifest";
        "{} written to {}",
        plural_count(manifest.pages.len(), "route"),
        config.root_relative(&path).display()
    );
    Ok(path)
}
