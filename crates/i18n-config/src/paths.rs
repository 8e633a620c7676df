//! Configuration and data directory paths.
//!
//! Uses XDG directories via the `dirs` crate:
//! - Linux: `~/.config/i18n-review/`, `~/.cache/i18n-review/`
//! - macOS: `~/Library/Application Support/i18n-review/`, `~/Library/Caches/i18n-review/`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "i18n-review";
const LOCAL_CONFIG_FILE: &str = "i18n-review.toml";

/// Get the application config directory, creating it if needed.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed.
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the path to the global app config file.
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the path to the local (CWD) config file, if it exists.
pub fn local_config_path() -> Option<PathBuf> {
    let path = std::env::current_dir().ok()?.join(LOCAL_CONFIG_FILE);
    path.exists().then_some(path)
}

/// Get the path of the review report for one pull request.
pub fn report_path(pr_number: u64) -> Result<PathBuf> {
    let dir = cache_dir()?.join("reports");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(format!("pr-{}.json", pr_number)))
}

/// Get the path of the cached reference document.
pub fn reference_cache_path() -> Result<PathBuf> {
    Ok(cache_dir()?.join("reference.md"))
}
