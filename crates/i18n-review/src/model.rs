//! Review model collaborator.
//!
//! The orchestration talks to the model through the [`ReviewModel`]
//! trait; [`AnthropicModel`] is the production implementation against the
//! Messages API. The model's reply is expected to be a JSON object with a
//! `comments` array and an optional `overall_comment`; anchors the model
//! invented are filtered out later by the caller against the parsed
//! anchor map.

use crate::prompt;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use i18n_diff::AddedLine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Everything the model needs for one pull request review.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    /// Pull request title, for context.
    pub pr_title: String,
    /// Reference document (glossary / style guide), when configured.
    pub reference: Option<String>,
    /// The locale files under review.
    pub files: Vec<FileForReview>,
}

/// One locale file handed to the model.
#[derive(Debug, Clone)]
pub struct FileForReview {
    /// Path in the new tree.
    pub filename: String,
    /// Full new-version content, when it could be fetched.
    pub content: Option<String>,
    /// The added lines with their valid anchors.
    pub added: Vec<AddedLine>,
}

/// One comment the model produced, still unvalidated.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ModelComment {
    #[serde(alias = "file", alias = "path")]
    pub filename: String,
    #[serde(alias = "diffPosition", alias = "position")]
    pub diff_position: u32,
    #[serde(alias = "body", alias = "comment")]
    pub message: String,
}

/// The model's structured reply.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct ReviewOutcome {
    #[serde(default)]
    pub comments: Vec<ModelComment>,
    #[serde(default, alias = "overallComment")]
    pub overall_comment: Option<String>,
}

/// Text-generation model that reviews locale changes.
#[async_trait]
pub trait ReviewModel: Send + Sync {
    async fn review(&self, request: &ReviewRequest) -> Result<ReviewOutcome>;
}

/// Messages API implementation.
#[derive(Debug, Clone)]
pub struct AnthropicModel {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicModel {
    /// Build a client from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env(model: impl Into<String>, max_tokens: u32) -> Result<Self> {
        let api_key = env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable not set")?;
        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            max_tokens,
        })
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[async_trait]
impl ReviewModel for AnthropicModel {
    async fn review(&self, request: &ReviewRequest) -> Result<ReviewOutcome> {
        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt::build_prompt(request),
            }],
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .context("Model API request failed")?;

        if response.status() != StatusCode::OK {
            bail!("Model API request failed: {}", response.text().await?);
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .context("Failed to decode model API response")?;
        let text = reply
            .content
            .first()
            .map(|block| block.text.as_str())
            .unwrap_or_default();

        parse_model_output(text)
    }
}

/// Parse the model's reply into a [`ReviewOutcome`].
///
/// Tolerates a fenced ```json block around the object; anything that is
/// not a JSON object with the expected shape is an error.
pub fn parse_model_output(text: &str) -> Result<ReviewOutcome> {
    let json = strip_code_fence(text);
    serde_json::from_str(json).context("Model reply is not a valid review JSON object")
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let outcome = parse_model_output(
            r#"{"comments": [{"filename": "locales/en.json", "diff_position": 3, "message": "typo"}], "overall_comment": "ok"}"#,
        )
        .unwrap();

        assert_eq!(outcome.comments.len(), 1);
        assert_eq!(outcome.comments[0].filename, "locales/en.json");
        assert_eq!(outcome.comments[0].diff_position, 3);
        assert_eq!(outcome.overall_comment.as_deref(), Some("ok"));
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"comments\": [], \"overallComment\": \"nothing found\"}\n```";
        let outcome = parse_model_output(text).unwrap();
        assert!(outcome.comments.is_empty());
        assert_eq!(outcome.overall_comment.as_deref(), Some("nothing found"));
    }

    #[test]
    fn test_parse_aliased_keys() {
        let outcome = parse_model_output(
            r#"{"comments": [{"path": "locales/de.json", "position": 1, "body": "Umlaut missing"}]}"#,
        )
        .unwrap();

        assert_eq!(outcome.comments[0].filename, "locales/de.json");
        assert_eq!(outcome.comments[0].diff_position, 1);
        assert_eq!(outcome.comments[0].message, "Umlaut missing");
        assert!(outcome.overall_comment.is_none());
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let outcome = parse_model_output("{}").unwrap();
        assert!(outcome.comments.is_empty());
        assert!(outcome.overall_comment.is_none());
    }

    #[test]
    fn test_parse_prose_is_an_error() {
        assert!(parse_model_output("Sure! Here are my thoughts...").is_err());
    }
}
