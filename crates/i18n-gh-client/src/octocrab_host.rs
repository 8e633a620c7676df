//! Octocrab-based GitHub host implementation.
//!
//! Uses octocrab's typed API where it covers an endpoint and raw
//! `get`/`post` routes where it does not (the reviews and pull-request
//! files endpoints).

use crate::host::GitHubHost;
use crate::types::{PositionComment, PullRequest, PullRequestFile, ReviewComment, ReviewEvent};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

/// Direct GitHub API client using octocrab.
#[derive(Debug, Clone)]
pub struct OctocrabHost {
    octocrab: Arc<Octocrab>,
}

impl OctocrabHost {
    /// Create a new host client with the given octocrab instance.
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Build a host client authenticated with a personal token.
    pub fn with_token(token: String) -> anyhow::Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token)
            .build()
            .context("Failed to build GitHub client")?;
        Ok(Self::new(Arc::new(octocrab)))
    }
}

#[async_trait]
impl GitHubHost for OctocrabHost {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        debug!("Fetching PR {}/{}#{}", owner, repo, pr_number);

        let pr = self
            .octocrab
            .pulls(owner, repo)
            .get(pr_number)
            .await
            .with_context(|| format!("Failed to fetch PR {}/{}#{}", owner, repo, pr_number))?;

        Ok(convert_pull_request(&pr))
    }

    async fn fetch_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<PullRequestFile>> {
        debug!("Fetching file list for {}/{}#{}", owner, repo, pr_number);

        const PER_PAGE: usize = 100;
        let mut files = Vec::new();
        let mut page_num = 1u32;

        loop {
            let route = format!(
                "/repos/{}/{}/pulls/{}/files?per_page={}&page={}",
                owner, repo, pr_number, PER_PAGE, page_num
            );
            let page: Vec<PullRequestFile> = self.octocrab.get(route, None::<&()>).await?;
            let page_len = page.len();
            files.extend(page);

            if page_len < PER_PAGE {
                break;
            }
            page_num += 1;
        }

        debug!(
            "Fetched {} changed files for {}/{}#{}",
            files.len(),
            owner,
            repo,
            pr_number
        );
        Ok(files)
    }

    async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> anyhow::Result<String> {
        debug!("Fetching content of {} at {}", path, git_ref);

        let contents = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(git_ref)
            .send()
            .await
            .with_context(|| format!("Failed to fetch content of {} at {}", path, git_ref))?;

        let item = contents
            .items
            .into_iter()
            .next()
            .with_context(|| format!("No content returned for {}", path))?;

        item.decoded_content()
            .with_context(|| format!("Content of {} is not decodable text", path))
    }

    async fn create_review(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        commit_id: &str,
        event: ReviewEvent,
        body: Option<&str>,
        comments: &[PositionComment],
    ) -> anyhow::Result<()> {
        debug!(
            "Submitting review with {} comments on {}/{}#{}",
            comments.len(),
            owner,
            repo,
            pr_number
        );

        let route = format!("/repos/{}/{}/pulls/{}/reviews", owner, repo, pr_number);
        let payload = serde_json::json!({
            "commit_id": commit_id,
            "event": event.as_api_str(),
            "body": body.unwrap_or(""),
            "comments": comments,
        });

        let _: serde_json::Value = self
            .octocrab
            .post(route, Some(&payload))
            .await
            .with_context(|| format!("Failed to submit review on {}/{}#{}", owner, repo, pr_number))?;

        Ok(())
    }

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
    ) -> anyhow::Result<u64> {
        debug!(
            "Creating review comment on {}/{}#{} {}:{} ({})",
            owner, repo, pr_number, path, line, side
        );

        let route = format!("/repos/{}/{}/pulls/{}/comments", owner, repo, pr_number);
        let payload = serde_json::json!({
            "body": body,
            "commit_id": commit_id,
            "path": path,
            "line": line,
            "side": side,
        });

        let created: CreatedComment = self
            .octocrab
            .post(route, Some(&payload))
            .await
            .with_context(|| format!("Failed to create comment on {}:{}", path, line))?;

        Ok(created.id)
    }

    async fn fetch_review_comments(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<Vec<ReviewComment>> {
        const PER_PAGE: usize = 100;
        let mut comments: Vec<ReviewComment> = Vec::new();
        let mut page_num = 1u32;

        loop {
            let route = format!(
                "/repos/{}/{}/pulls/{}/comments?per_page={}&page={}",
                owner, repo, pr_number, PER_PAGE, page_num
            );
            let page: Vec<ReviewComment> = self.octocrab.get(route, None::<&()>).await?;
            let page_len = page.len();
            comments.extend(page);

            if page_len < PER_PAGE {
                break;
            }
            page_num += 1;
        }

        debug!(
            "Fetched {} review comments for {}/{}#{}",
            comments.len(),
            owner,
            repo,
            pr_number
        );
        Ok(comments)
    }
}

/// Minimal response shape of the comment-creation endpoint.
#[derive(Debug, Deserialize)]
struct CreatedComment {
    id: u64,
}

/// Convert octocrab's PullRequest model to our DTO.
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        body: pr.body.clone(),
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        head_sha: pr.head.sha.clone(),
        base_sha: pr.base.sha.clone(),
        base_branch: pr.base.ref_field.clone(),
        head_branch: pr.head.ref_field.clone(),
        created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
        updated_at: pr.updated_at.unwrap_or_else(chrono::Utc::now),
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
    }
}
