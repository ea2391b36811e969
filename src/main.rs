//! lingomap - bilingual page discovery and hreflang-aware sitemaps.

mod cli;
mod config;
mod core;
mod discovery;
mod generator;
mod logger;
mod page;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Build { .. } => cli::build::build_sitemaps(&config).map(|_| ()),
        Commands::Serve { .. } => cli::serve::bind_server()?.run(),
        Commands::Discover { args } => cli::discover::run_discover(args, &config),
        Commands::Manifest { output, pretty } => {
            cli::manifest::write_manifest(output.as_deref(), *pretty, &config).map(|_| ())
        }
        Commands::Validate { strict } => cli::validate::validate_site(*strict, &config),
    }
}
