//! `lingomap discover`: print page pairs as JSON.

use super::args::DiscoverArgs;
use crate::{
    config::SiteConfig,
    discovery::{Discovery, SkippedEntry, discover},
    log,
    page::{DiscoveredPage, LanguagePair},
    utils::{date::DateTimeUtc, plural_count},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

/// JSON document written by the command.
#[derive(Debug, Serialize)]
struct DiscoverOutput<'a> {
    discovered_at: DateTimeUtc,
    pairs: Vec<&'a LanguagePair>,
    #[serde(skip_serializing_if = "is_empty")]
    skipped: &'a [SkippedEntry],
    #[serde(skip_serializing_if = "is_empty")]
    duplicates: &'a [DiscoveredPage],
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

pub fn run_discover(args: &DiscoverArgs, config: &SiteConfig) -> Result<()> {
    let discovery = discover(&config.discovery).context("page discovery failed")?;
    let json = render(&discovery, args)?;

    match &args.output {
        Some(path) => {
            let path = config.root_join(path);
            fs::write(&path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log!(
                "discover";
                "{} written to {}",
                plural_count(discovery.len(), "pair"),
                config.root_relative(&path).display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn render(discovery: &Discovery, args: &DiscoverArgs) -> Result<String> {
    let pairs = discovery
        .pairs()
        .filter(|pair| args.language.is_none_or(|lang| pair.get(lang).is_some()))
        .filter(|pair| !args.orphans || !pair.is_complete())
        .collect();

    let output = DiscoverOutput {
        discovered_at: discovery.discovered_at(),
        pairs,
        skipped: discovery.skipped(),
        duplicates: discovery.duplicates(),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(json)
}
