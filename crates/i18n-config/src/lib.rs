//! Configuration and local state for i18n-review.
//!
//! This crate provides:
//! - File path utilities for config, cache and report files
//! - Application configuration (TOML, defaults per field)
//! - Locale-file selection by glob pattern
//! - The TTL-based reference document cache

pub mod app_config;
pub mod locales;
pub mod paths;
pub mod refcache;

pub use app_config::AppConfig;
pub use locales::LocaleMatcher;
pub use refcache::ReferenceCache;
