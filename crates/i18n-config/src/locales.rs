//! Locale file selection by glob pattern.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Matches repository paths against the configured locale-file patterns.
#[derive(Debug)]
pub struct LocaleMatcher {
    set: GlobSet,
}

impl LocaleMatcher {
    /// Build a matcher from glob patterns.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern)
                .with_context(|| format!("Invalid locale pattern: {}", pattern))?;
            builder.add(glob);
        }
        let set = builder.build().context("Failed to build locale matcher")?;
        Ok(Self { set })
    }

    /// Whether a repository-relative path is a locale file.
    pub fn is_locale_file(&self, path: &str) -> bool {
        self.set.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfig;

    #[test]
    fn test_default_patterns_match_common_layouts() {
        let matcher = LocaleMatcher::new(&AppConfig::default().locale_patterns).unwrap();

        assert!(matcher.is_locale_file("src/locales/en.json"));
        assert!(matcher.is_locale_file("app/locales/de/common.yml"));
        assert!(matcher.is_locale_file("packages/web/i18n/fr.json"));
        assert!(matcher.is_locale_file("po/ja.po"));

        assert!(!matcher.is_locale_file("src/main.rs"));
        assert!(!matcher.is_locale_file("README.md"));
        assert!(!matcher.is_locale_file("assets/logo.json"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result = LocaleMatcher::new(&["[".to_string()]);
        assert!(result.is_err());
    }
}
