//! Site configuration management for `lingomap.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── discovery  # [discovery]
//! │   ├── serve      # [serve]
//! │   ├── site       # [site]
//! │   └── sitemap    # [sitemap]
//! ├── types/         # ConfigError, diagnostics, global handle
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildSectionConfig, DiscoveryConfig, RouteSource, ServeConfig, SiteSectionConfig,
    SitemapConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::{
    cli::{Cli, Commands, SitemapArgs},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing lingomap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site settings (base URL)
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Route source, classification and slug mapping
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Sitemap entry defaults and caching
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Build output settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Sitemap server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = find_config_file(&cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.finalize(cli);
        config.validate(cli)?;

        Ok(config)
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.root = root.clone();
        self.apply_command_options(cli);
        self.normalize_paths(&root);
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} (ignored):", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Record the address the server actually bound, which may differ from
    /// `serve.port` after a port retry. Without a configured `site.url`,
    /// sitemap URLs point at this address.
    pub fn apply_bound_address(&mut self, addr: SocketAddr) {
        self.serve.interface = addr.ip();
        self.serve.port = addr.port();
        if self.site.url.is_none() {
            self.site.url = Some(format!("http://{addr}"));
        }
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the site root (for log output).
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        match &cli.command {
            Commands::Build {
                output,
                sitemap_args,
            } => {
                Self::update_option(&mut self.build.output, output.as_ref());
                self.apply_sitemap_args(sitemap_args);
            }
            Commands::Serve {
                sitemap_args,
                interface,
                port,
            } => {
                self.apply_sitemap_args(sitemap_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Discover { .. } | Commands::Manifest { .. } | Commands::Validate { .. } => {}
        }
    }

    /// Apply shared sitemap arguments from CLI.
    fn apply_sitemap_args(&mut self, args: &SitemapArgs) {
        Self::update_option(&mut self.sitemap.minify, args.minify.as_ref());
        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve relative paths against the project root.
    fn normalize_paths(&mut self, root: &Path) {
        self.build.output = root.join(&self.build.output);
        self.discovery.normalize(root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    fn validate(&self, cli: &Cli) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(cli.is_build(), &mut diag);
        self.sitemap.validate(&mut diag);
        self.serve.validate(&mut diag);
        self.discovery.validate(&mut diag);

        if cli.is_manifest() && self.discovery.routes_dir.is_none() {
            diag.error_with_hint(
                FieldPath::new("discovery.routes_dir"),
                "the manifest command scans a routes directory, but none is configured",
                "set discovery.routes_dir = \"app\"",
            );
        }

        diag.into_result()?;
        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[discovery]` source.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[discovery]\nmanifest = \"routes.json\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
