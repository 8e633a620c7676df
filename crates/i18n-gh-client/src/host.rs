//! GitHub host trait.
//!
//! This is the narrow interface the review workflow consumes. Everything
//! the orchestration needs from the source-control host goes through it,
//! which keeps the parser and the orchestration testable against fakes.

use crate::types::{PositionComment, PullRequest, PullRequestFile, ReviewComment, ReviewEvent};
use async_trait::async_trait;

/// Source-control host interface for the review workflow.
///
/// Implementations must be `Send + Sync` to allow sharing across async
/// tasks.
#[async_trait]
pub trait GitHubHost: Send + Sync {
    /// Fetch a single pull request by number.
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest>;

    /// Fetch the changed-file list of a pull request, each entry carrying
    /// its per-file patch text when one exists.
    async fn fetch_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<PullRequestFile>>;

    /// Fetch the raw content of a file at a given commit reference.
    async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> anyhow::Result<String>;

    /// Submit a review whose comments use the legacy position anchor form.
    ///
    /// All comments land in one review, so the host shows them as a single
    /// batch rather than a stream of single comments.
    async fn create_review(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        commit_id: &str,
        event: ReviewEvent,
        body: Option<&str>,
        comments: &[PositionComment],
    ) -> anyhow::Result<()>;

    /// Create a single review comment in the line + side anchor form.
    ///
    /// Returns the created comment's ID.
    #[allow(clippy::too_many_arguments)]
    async fn create_review_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        commit_id: &str,
        path: &str,
        line: u32,
        side: &str,
        body: &str,
    ) -> anyhow::Result<u64>;

    /// Fetch the existing review comments of a pull request.
    async fn fetch_review_comments(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<ReviewComment>>;
}
