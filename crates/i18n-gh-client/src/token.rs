//! GitHub token resolution.
//!
//! Tries multiple sources in order:
//! 1. `GITHUB_TOKEN` or `GH_TOKEN` environment variable
//! 2. `gh auth token` command

use anyhow::{bail, Context, Result};
use log::debug;

/// Resolves a GitHub token for github.com.
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    /// Token injected for tests; bypasses env and gh CLI lookup.
    fixed: Option<String>,
}

impl TokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver that always yields the given token.
    pub fn fixed(token: impl Into<String>) -> Self {
        Self {
            fixed: Some(token.into()),
        }
    }

    /// Resolve a token, or fail with a hint about the expected sources.
    pub async fn get_token(&self) -> Result<String> {
        if let Some(token) = &self.fixed {
            return Ok(token.clone());
        }

        if let Some(token) = env_token() {
            debug!("Using token from environment");
            return Ok(token);
        }

        debug!("Trying gh auth token");
        let output = tokio::process::Command::new("gh")
            .args(["auth", "token"])
            .output()
            .await
            .context("Failed to run 'gh auth token'")?;

        if output.status.success() {
            let token = String::from_utf8(output.stdout)
                .context("Invalid UTF-8 in gh auth token output")?
                .trim()
                .to_string();
            if !token.is_empty() {
                debug!("Using token from gh CLI");
                return Ok(token);
            }
        }

        bail!("No GitHub token found: set GITHUB_TOKEN/GH_TOKEN or log in with 'gh auth login'")
    }
}

fn env_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .or_else(|_| std::env::var("GH_TOKEN"))
        .ok()
        .filter(|t| !t.is_empty())
}
