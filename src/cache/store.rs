//! Cache store - Read/write the menu cache file

use anyhow::{Context, Result};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::backends::MenuSource;
use crate::core::error::{is_cache_miss, PappyError};
use crate::core::model::MenuCache;

/// Read the cache file
///
/// Fails with [`PappyError::NotFound`] when the file does not exist, so the
/// caller can decide to regenerate.
pub fn load(path: &Path) -> Result<MenuCache> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(PappyError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(err) => return Err(PappyError::io("failed to read cache file", path, err).into()),
    };

    let cache: MenuCache =
        serde_json::from_str(&content).map_err(|err| PappyError::CorruptCache {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    debug!(
        path = %path.display(),
        categories = cache.len(),
        "loaded menu cache"
    );
    Ok(cache)
}

/// Overwrite the cache file
///
/// The JSON is written to a temporary file next to the target and renamed
/// over it, so readers never observe a half-written cache.
pub fn save(path: &Path, cache: &MenuCache) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|err| PappyError::io("failed to create cache directory", dir, err))?;
    }

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|err| PappyError::io("failed to create temporary file in", dir, err))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer(&mut writer, cache).context("Failed to serialize menu cache")?;
        writer
            .flush()
            .map_err(|err| PappyError::io("failed to write cache file", path, err))?;
    }
    tmp.persist(path)
        .map_err(|err| PappyError::io("failed to write cache file", path, err.error))?;

    debug!(path = %path.display(), "saved menu cache");
    Ok(())
}

/// Build a fresh menu from `source` and persist it before returning it
pub fn regenerate(path: &Path, source: &dyn MenuSource) -> Result<MenuCache> {
    let cache = source.generate()?;
    if cache.is_empty() {
        warn!(path = %path.display(), "menu generator returned no categories");
    }
    save(path, &cache)?;
    info!(
        path = %path.display(),
        categories = cache.len(),
        programs = cache.program_count(),
        "regenerated menu cache"
    );
    Ok(cache)
}

/// Load the cache, regenerating it once if the file is missing
pub fn load_or_regenerate(path: &Path, source: &dyn MenuSource) -> Result<MenuCache> {
    match load(path) {
        Ok(cache) => Ok(cache),
        Err(err) if is_cache_miss(&err) => {
            info!(path = %path.display(), "menu cache missing, regenerating");
            regenerate(path, source)
        }
        Err(err) => Err(err),
    }
}
