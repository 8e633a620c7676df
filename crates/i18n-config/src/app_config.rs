//! Application configuration loaded from a TOML file.
//!
//! A local `i18n-review.toml` in the working directory takes precedence
//! over the global config file; missing or unparsable config falls back
//! to defaults with a warning.

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Review model identifier passed to the model API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Token budget for the model's reply.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Glob patterns selecting locale files within the repository.
    #[serde(default = "default_locale_patterns")]
    pub locale_patterns: Vec<String>,

    /// Path to the reference document (glossary / style guide) handed to
    /// the model along with the diff. Optional.
    #[serde(default)]
    pub reference_path: Option<String>,

    /// How long a cached copy of the reference document stays valid.
    #[serde(default = "default_reference_ttl_hours")]
    pub reference_ttl_hours: u64,

    /// Upper bound on locale files analyzed per pull request.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Hidden marker appended to every posted comment, used to recognize
    /// this tool's own comments on re-runs.
    #[serde(default = "default_bot_marker")]
    pub bot_marker: String,
}

fn default_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_locale_patterns() -> Vec<String> {
    vec![
        "**/locales/**/*.json".to_string(),
        "**/locales/**/*.yml".to_string(),
        "**/locales/**/*.yaml".to_string(),
        "**/i18n/**/*.json".to_string(),
        "**/*.po".to_string(),
    ]
}

fn default_reference_ttl_hours() -> u64 {
    24
}

fn default_max_files() -> usize {
    50
}

fn default_bot_marker() -> String {
    "<!-- i18n-review -->".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            locale_patterns: default_locale_patterns(),
            reference_path: None,
            reference_ttl_hours: default_reference_ttl_hours(),
            max_files: default_max_files(),
            bot_marker: default_bot_marker(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the global config file, or use
    /// defaults.
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}

/// Read the first config file found: local CWD file, then global.
fn load_config_file() -> Option<String> {
    if let Some(local) = crate::paths::local_config_path() {
        return std::fs::read_to_string(local).ok();
    }
    let global = crate::paths::app_config_path().ok()?;
    std::fs::read_to_string(global).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model, "claude-3-5-sonnet-latest");
        assert!(!config.locale_patterns.is_empty());
        assert!(config.reference_path.is_none());
        assert_eq!(config.reference_ttl_hours, 24);
        assert!(config.bot_marker.starts_with("<!--"));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            model = "claude-3-5-haiku-latest"
            locale_patterns = ["translations/**/*.json"]
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.model, "claude-3-5-haiku-latest");
        assert_eq!(config.locale_patterns, vec!["translations/**/*.json"]);
        // Unspecified fields take defaults.
        assert_eq!(config.max_files, 50);
        assert_eq!(config.max_output_tokens, 4096);
    }
}
