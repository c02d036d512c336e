//! Cache location
//!
//! The menu cache lives at `<user-cache-dir>/pappymenu/menu-cache`, where the
//! user cache dir follows the XDG base-directory rules (`$XDG_CACHE_HOME`,
//! falling back to `~/.cache`).

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Application directory name under the user cache dir
pub const APP_NAME: &str = "pappymenu";

/// Cache file name
pub const CACHE_FILE: &str = "menu-cache";

/// Default cache file path for the current user
pub fn default_cache_path() -> Result<PathBuf> {
    let base = dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .ok_or_else(|| anyhow!("could not determine the user cache directory"))?;

    Ok(cache_path_in(&base))
}

/// Cache file path under a given cache base directory
pub fn cache_path_in(base: &Path) -> PathBuf {
    base.join(APP_NAME).join(CACHE_FILE)
}

/// Pick the explicit override if present, otherwise the default location
pub fn resolve_cache_path(override_path: Option<&Path>) -> Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => default_cache_path(),
    }
}
