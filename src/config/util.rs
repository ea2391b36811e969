//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find the config file by searching upward from the current directory.
///
/// An absolute `config_name` that exists is returned as is. Otherwise each
/// ancestor of cwd is tried in turn:
///
/// ```text
/// /srv/site/app/es/about/   ← cwd
/// /srv/site/lingomap.toml   ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}
