//! Time-based cache for the reference document.
//!
//! The reference document (translation glossary / style guide) changes
//! rarely, so a copy is kept under the cache directory and reused while
//! its age is within the configured TTL. The cache is rewritten with a
//! write-then-rename so a crash never leaves a truncated copy.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// TTL-based file cache for a single document.
#[derive(Debug)]
pub struct ReferenceCache {
    path: PathBuf,
    ttl: Duration,
}

impl ReferenceCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// Return the cached document if fresh, otherwise fetch a new copy.
    ///
    /// A failed fetch falls back to a stale cached copy when one exists;
    /// without one, the fetch error propagates.
    pub fn load_with<F>(&self, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if self.is_fresh() {
            if let Some(content) = self.read_cached() {
                debug!("Reference cache hit: {}", self.path.display());
                return Ok(content);
            }
        }

        match fetch() {
            Ok(content) => {
                if let Err(e) = atomic_write(&self.path, &content) {
                    warn!("Failed to update reference cache: {}", e);
                }
                Ok(content)
            }
            Err(e) => match self.read_cached() {
                Some(stale) => {
                    warn!("Reference fetch failed ({}), using stale cache", e);
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    fn read_cached(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn is_fresh(&self) -> bool {
        let Ok(metadata) = fs::metadata(&self.path) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        match modified.elapsed() {
            Ok(age) => age < self.ttl,
            // Clock skew put the mtime in the future; treat as fresh.
            Err(_) => true,
        }
    }
}

/// Write content to a sibling temp file, then atomically rename it over
/// the target.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid cache file path")?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }

    Ok(())
}
