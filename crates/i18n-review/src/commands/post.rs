//! The post step: publish a report's comments back to the host.

use crate::cli::AnchorMode;
use crate::report::{ReportComment, ReviewReport};
use anyhow::Result;
use i18n_config::AppConfig;
use i18n_gh_client::{GitHubHost, PositionComment, ReviewComment, ReviewEvent};
use log::{debug, info, warn};

/// Publish a review report to the pull request it was produced for.
pub async fn post(
    host: &dyn GitHubHost,
    config: &AppConfig,
    owner: &str,
    repo: &str,
    report: &ReviewReport,
    mode: AnchorMode,
) -> Result<()> {
    if report.is_empty() {
        info!("Report for PR #{} has nothing to post", report.pr_number);
        return Ok(());
    }
    match mode {
        AnchorMode::Position => post_as_review(host, owner, repo, report).await,
        AnchorMode::Line => post_line_comments(host, config, owner, repo, report).await,
    }
}

/// Submit everything as one review whose comments use the legacy
/// diff-position anchor. The whole batch succeeds or fails together.
async fn post_as_review(
    host: &dyn GitHubHost,
    owner: &str,
    repo: &str,
    report: &ReviewReport,
) -> Result<()> {
    let comments: Vec<PositionComment> = report
        .comments
        .iter()
        .map(|c| PositionComment {
            path: c.path.clone(),
            position: c.diff_position,
            body: c.body.clone(),
        })
        .collect();

    host.create_review(
        owner,
        repo,
        report.pr_number,
        &report.head_sha,
        ReviewEvent::Comment,
        report.overall_comment.as_deref(),
        &comments,
    )
    .await?;
    info!(
        "Submitted review with {} comments on #{}",
        comments.len(),
        report.pr_number
    );
    Ok(())
}

/// Post comments one by one in the line + side anchor form, skipping
/// anchors this tool already commented on. Individual failures are
/// logged and the rest of the batch continues.
async fn post_line_comments(
    host: &dyn GitHubHost,
    config: &AppConfig,
    owner: &str,
    repo: &str,
    report: &ReviewReport,
) -> Result<()> {
    let existing = host
        .fetch_review_comments(owner, repo, report.pr_number)
        .await?;

    let mut posted = 0usize;
    let mut failed = 0usize;
    for comment in &report.comments {
        if already_posted(&existing, comment, &config.bot_marker) {
            debug!(
                "Skipping {}:{} (already commented)",
                comment.path, comment.line
            );
            continue;
        }
        match host
            .create_review_comment(
                owner,
                repo,
                report.pr_number,
                &report.head_sha,
                &comment.path,
                comment.line,
                &comment.side,
                &comment.body,
            )
            .await
        {
            Ok(id) => {
                debug!(
                    "Created comment {} on {}:{}",
                    id, comment.path, comment.line
                );
                posted += 1;
            }
            Err(e) => {
                warn!(
                    "Failed to comment on {}:{}: {}",
                    comment.path, comment.line, e
                );
                failed += 1;
            }
        }
    }

    if let Some(overall) = &report.overall_comment {
        host.create_review(
            owner,
            repo,
            report.pr_number,
            &report.head_sha,
            ReviewEvent::Comment,
            Some(overall),
            &[],
        )
        .await?;
    }

    if failed > 0 {
        warn!(
            "Posted {} line comments on #{}, {} failed",
            posted, report.pr_number, failed
        );
    } else {
        info!("Posted {} line comments on #{}", posted, report.pr_number);
    }
    Ok(())
}

/// A comment is a duplicate when an existing comment from this tool sits
/// on the same file and line. The marker check keeps human comments on
/// the same line from suppressing ours.
fn already_posted(existing: &[ReviewComment], comment: &ReportComment, marker: &str) -> bool {
    existing.iter().any(|c| {
        c.path == comment.path && c.line == Some(comment.line) && c.body.contains(marker)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use i18n_gh_client::{PullRequest, PullRequestFile};
    use std::sync::Mutex;

    fn report_with(comments: Vec<ReportComment>, overall: Option<&str>) -> ReviewReport {
        let mut report = ReviewReport::new(7, "headsha".to_string());
        report.comments = comments;
        report.overall_comment = overall.map(str::to_string);
        report
    }

    fn comment(path: &str, position: u32, line: u32, body: &str) -> ReportComment {
        ReportComment {
            path: path.to_string(),
            diff_position: position,
            line,
            side: "RIGHT".to_string(),
            body: body.to_string(),
        }
    }

    fn existing_comment(path: &str, line: u32, body: &str) -> ReviewComment {
        ReviewComment {
            id: 1,
            path: path.to_string(),
            position: None,
            line: Some(line),
            side: Some("RIGHT".to_string()),
            body: body.to_string(),
            user: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// Records every write call so tests can assert on what was posted.
    #[derive(Default)]
    struct RecordingHost {
        existing: Vec<ReviewComment>,
        reviews: Mutex<Vec<(Option<String>, usize)>>,
        line_comments: Mutex<Vec<(String, u32)>>,
    }

    #[async_trait]
    impl GitHubHost for RecordingHost {
        async fn fetch_pull_request(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
        ) -> anyhow::Result<PullRequest> {
            unimplemented!("not used by post")
        }

        async fn fetch_pull_request_files(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
        ) -> anyhow::Result<Vec<PullRequestFile>> {
            unimplemented!("not used by post")
        }

        async fn fetch_file_content(
            &self,
            _owner: &str,
            _repo: &str,
            _path: &str,
            _git_ref: &str,
        ) -> anyhow::Result<String> {
            unimplemented!("not used by post")
        }

        async fn create_review(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
            _commit_id: &str,
            _event: ReviewEvent,
            body: Option<&str>,
            comments: &[PositionComment],
        ) -> anyhow::Result<()> {
            self.reviews
                .lock()
                .unwrap()
                .push((body.map(str::to_string), comments.len()));
            Ok(())
        }

        #[allow(clippy::too_many_arguments)]
        async fn create_review_comment(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
            _commit_id: &str,
            path: &str,
            line: u32,
            _side: &str,
            _body: &str,
        ) -> anyhow::Result<u64> {
            let mut calls = self.line_comments.lock().unwrap();
            calls.push((path.to_string(), line));
            Ok(calls.len() as u64)
        }

        async fn fetch_review_comments(
            &self,
            _owner: &str,
            _repo: &str,
            _pr_number: u64,
        ) -> anyhow::Result<Vec<ReviewComment>> {
            Ok(self.existing.clone())
        }
    }

    #[test]
    fn test_already_posted_requires_marker_and_line() {
        let marker = "<!-- bot -->";
        let existing = vec![
            existing_comment("locales/de.json", 3, "nitpick\n\n<!-- bot -->"),
            existing_comment("locales/de.json", 5, "a human comment"),
        ];

        let ours = comment("locales/de.json", 1, 3, "x");
        assert!(already_posted(&existing, &ours, marker));

        // Same line but only a human comment there.
        let ours = comment("locales/de.json", 2, 5, "x");
        assert!(!already_posted(&existing, &ours, marker));

        // Different file entirely.
        let ours = comment("locales/fr.json", 1, 3, "x");
        assert!(!already_posted(&existing, &ours, marker));
    }

    #[tokio::test]
    async fn test_post_position_mode_submits_one_review() {
        let host = RecordingHost::default();
        let report = report_with(
            vec![
                comment("locales/de.json", 1, 10, "a"),
                comment("locales/de.json", 2, 11, "b"),
            ],
            Some("Overall: fine."),
        );

        post(&host, &AppConfig::default(), "acme", "webapp", &report, AnchorMode::Position)
            .await
            .unwrap();

        let reviews = host.reviews.lock().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0], (Some("Overall: fine.".to_string()), 2));
        assert!(host.line_comments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_line_mode_skips_duplicates_and_posts_overall() {
        let config = AppConfig::default();
        let dup_body = format!("old finding\n\n{}", config.bot_marker);
        let host = RecordingHost {
            existing: vec![existing_comment("locales/de.json", 10, &dup_body)],
            ..Default::default()
        };
        let report = report_with(
            vec![
                comment("locales/de.json", 1, 10, "duplicate"),
                comment("locales/de.json", 2, 11, "fresh"),
            ],
            Some("Overall: one issue."),
        );

        post(&host, &config, "acme", "webapp", &report, AnchorMode::Line)
            .await
            .unwrap();

        let line_comments = host.line_comments.lock().unwrap();
        assert_eq!(line_comments.as_slice(), &[("locales/de.json".to_string(), 11)]);

        // The overall comment goes out as a comment-only review.
        let reviews = host.reviews.lock().unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0], (Some("Overall: one issue.".to_string()), 0));
    }

    #[tokio::test]
    async fn test_post_line_mode_sees_duplicates_deep_in_a_large_comment_list() {
        let config = AppConfig::default();
        let dup_body = format!("old finding\n\n{}", config.bot_marker);
        // More existing comments than one API page holds; the bot comment
        // sits past the first hundred.
        let mut existing: Vec<ReviewComment> = (1..=150)
            .map(|line| existing_comment("locales/fr.json", line, "a human comment"))
            .collect();
        existing.push(existing_comment("locales/de.json", 10, &dup_body));
        let host = RecordingHost {
            existing,
            ..Default::default()
        };
        let report = report_with(vec![comment("locales/de.json", 1, 10, "duplicate")], None);

        post(&host, &config, "acme", "webapp", &report, AnchorMode::Line)
            .await
            .unwrap();

        assert!(host.line_comments.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_empty_report_is_a_no_op() {
        let host = RecordingHost::default();
        let report = report_with(Vec::new(), None);

        post(&host, &AppConfig::default(), "acme", "webapp", &report, AnchorMode::Line)
            .await
            .unwrap();

        assert!(host.reviews.lock().unwrap().is_empty());
        assert!(host.line_comments.lock().unwrap().is_empty());
    }
}
