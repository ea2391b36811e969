//! Discovery error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why no page list could be produced.
///
/// Discovery has no partial-result mode: any of these fails the whole run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no route source configured")]
    NoSource,

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to walk routes directory `{0}`")]
    Walk(PathBuf, #[source] jwalk::Error),

    #[error("invalid JSON route manifest `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("invalid TOML route manifest `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("unsupported route manifest format `{0}` (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}
