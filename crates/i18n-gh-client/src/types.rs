//! GitHub API data transfer objects.
//!
//! These types represent data exchanged with the GitHub API. They are
//! intentionally separate from the diff/report domain models to keep this
//! crate pure and reusable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request from the GitHub API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123).
    pub number: u64,

    /// PR title.
    pub title: String,

    /// PR body/description.
    pub body: Option<String>,

    /// Author's GitHub username.
    pub author: String,

    /// HEAD commit SHA (the version reviewed and commented on).
    pub head_sha: String,

    /// Base commit SHA.
    pub base_sha: String,

    /// Base branch name (e.g., "main").
    pub base_branch: String,

    /// HEAD branch name.
    pub head_branch: String,

    /// When the PR was created.
    pub created_at: DateTime<Utc>,

    /// When the PR was last updated.
    pub updated_at: DateTime<Utc>,

    /// PR URL for log output.
    pub html_url: String,
}

/// One changed file of a pull request, as returned by the files endpoint.
///
/// `patch` is absent for binary files, rename-only entries, and files too
/// large to diff — such entries contribute zero reviewable lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Path of the file in the new tree.
    pub filename: String,

    /// Status string from the API ("added", "modified", "removed", ...).
    pub status: String,

    /// Unified diff patch body for this file (hunks only, no framing).
    #[serde(default)]
    pub patch: Option<String>,

    /// Number of lines added.
    #[serde(default)]
    pub additions: u64,

    /// Number of lines deleted.
    #[serde(default)]
    pub deletions: u64,
}

/// Review event type for PR reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewEvent {
    /// Approve the PR.
    Approve,
    /// Request changes.
    RequestChanges,
    /// Comment only (no approval/rejection).
    Comment,
}

impl ReviewEvent {
    /// The string the reviews endpoint expects.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            ReviewEvent::Approve => "APPROVE",
            ReviewEvent::RequestChanges => "REQUEST_CHANGES",
            ReviewEvent::Comment => "COMMENT",
        }
    }
}

/// A review comment in the legacy position-anchored form, as accepted by
/// the reviews endpoint's `comments` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionComment {
    /// File path relative to the repository root.
    pub path: String,
    /// Position within the file's patch body.
    pub position: u32,
    /// Comment body (markdown).
    pub body: String,
}

/// An existing review comment on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    /// GitHub comment ID.
    pub id: u64,
    /// File path the comment is on.
    pub path: String,
    /// Position anchor, when the comment was posted in position form.
    #[serde(default)]
    pub position: Option<u32>,
    /// Line anchor, when the comment was posted in line form.
    #[serde(default)]
    pub line: Option<u32>,
    /// Which side of the diff: "LEFT" or "RIGHT".
    #[serde(default)]
    pub side: Option<String>,
    /// Comment body text.
    pub body: String,
    /// Comment author.
    #[serde(default)]
    pub user: Option<CommentAuthor>,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

/// Author of a review comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthor {
    /// GitHub username.
    pub login: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_event_api_strings() {
        assert_eq!(ReviewEvent::Approve.as_api_str(), "APPROVE");
        assert_eq!(ReviewEvent::RequestChanges.as_api_str(), "REQUEST_CHANGES");
        assert_eq!(ReviewEvent::Comment.as_api_str(), "COMMENT");
    }

    #[test]
    fn test_pull_request_file_deserializes_without_patch() {
        // Binary and oversized entries come back with no patch field.
        let json = r#"{"filename": "locales/logo.png", "status": "added"}"#;
        let file: PullRequestFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.filename, "locales/logo.png");
        assert!(file.patch.is_none());
        assert_eq!(file.additions, 0);
    }

    #[test]
    fn test_review_comment_deserializes_line_form() {
        let json = r#"{
            "id": 42,
            "path": "locales/en.json",
            "line": 7,
            "side": "RIGHT",
            "body": "typo",
            "user": {"login": "i18n-bot"},
            "created_at": "2024-05-01T12:00:00Z"
        }"#;
        let comment: ReviewComment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.id, 42);
        assert_eq!(comment.line, Some(7));
        assert_eq!(comment.position, None);
        assert_eq!(comment.user.unwrap().login, "i18n-bot");
    }
}
