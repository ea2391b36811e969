//! Command-line interface definitions.

use crate::page::Language;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Bilingual page discovery and sitemap generator
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: lingomap.toml)
    #[arg(short = 'C', long, global = true, default_value = "lingomap.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write every sitemap file into the output directory
    #[command(visible_alias = "b")]
    Build {
        /// Output directory path (relative to project root)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: Option<PathBuf>,

        #[command(flatten)]
        sitemap_args: SitemapArgs,
    },

    /// Serve the sitemap routes over HTTP, rediscovering pages per request
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        sitemap_args: SitemapArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print discovered page pairs as JSON
    #[command(visible_alias = "d")]
    Discover {
        #[command(flatten)]
        args: DiscoverArgs,
    },

    /// Scan the routes directory and write a route manifest
    #[command(visible_alias = "m")]
    Manifest {
        /// Manifest file to write, `.json` or `.toml` (default: routes.json)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check discovery results and rendered sitemaps
    #[command(visible_alias = "v")]
    Validate {
        /// Treat pages without a translation as errors
        #[arg(long)]
        strict: bool,
    },
}

/// Shared sitemap arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct SitemapArgs {
    /// Override site URL for deployment.
    ///
    /// Useful for CI/CD deployments where the production URL differs from
    /// the one in lingomap.toml.
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Minify the XML output
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Discover command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct DiscoverArgs {
    /// Only print pairs that have a page in this language
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Only print pairs missing a translation
    #[arg(long)]
    pub orphans: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }

    pub const fn is_manifest(&self) -> bool {
        matches!(self.command, Commands::Manifest { .. })
    }
}
