//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! output = "public"   # Directory the sitemap files are written to
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory (relative to the project root).
    pub output: PathBuf,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "public".into(),
        }
    }
}
