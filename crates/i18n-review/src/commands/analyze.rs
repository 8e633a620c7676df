//! The analyze step: parse locale patches, ask the model, write a report.

use crate::model::{FileForReview, ModelComment, ReviewModel, ReviewRequest};
use crate::report::{ReportComment, ReviewReport};
use anyhow::{Context, Result};
use i18n_config::{AppConfig, LocaleMatcher, ReferenceCache};
use i18n_diff::{added_lines, parse_file_patch, AnchorMap, FilePatch, FileStatus};
use i18n_gh_client::{GitHubHost, PullRequestFile};
use log::{debug, info, warn};
use std::time::Duration;

/// Analyze one pull request and produce its review report.
///
/// Per-file parse failures and model comments with unknown anchors are
/// logged and skipped; only collaborator failures (host, model) abort.
pub async fn analyze(
    host: &dyn GitHubHost,
    model: &dyn ReviewModel,
    config: &AppConfig,
    owner: &str,
    repo: &str,
    pr_number: u64,
) -> Result<ReviewReport> {
    let pr = host.fetch_pull_request(owner, repo, pr_number).await?;
    info!("Analyzing {}/{}#{}: {}", owner, repo, pr.number, pr.title);

    let files = host.fetch_pull_request_files(owner, repo, pr_number).await?;
    let matcher = LocaleMatcher::new(&config.locale_patterns)?;
    let patches = select_and_parse(&files, &matcher, config.max_files);

    let anchor_map = AnchorMap::new(&patches);
    let mut report = ReviewReport::new(pr.number, pr.head_sha.clone());
    if anchor_map.is_empty() {
        info!("No added locale lines to review");
        return Ok(report);
    }
    info!(
        "{} added locale lines across {} files",
        anchor_map.len(),
        patches.len()
    );

    let reference = load_reference(config)?;

    let mut files_for_review = Vec::with_capacity(patches.len());
    for patch in &patches {
        let content = match host
            .fetch_file_content(owner, repo, &patch.filename, &pr.head_sha)
            .await
        {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Could not fetch content of {}: {}", patch.filename, e);
                None
            }
        };
        files_for_review.push(FileForReview {
            filename: patch.filename.clone(),
            content,
            added: added_lines(std::slice::from_ref(patch)),
        });
    }

    let request = ReviewRequest {
        pr_title: pr.title.clone(),
        reference,
        files: files_for_review,
    };
    let outcome = model.review(&request).await?;

    let (comments, dropped) = filter_comments(outcome.comments, &anchor_map, &config.bot_marker);
    if dropped > 0 {
        warn!("Discarded {} model comments with unknown anchors", dropped);
    }
    report.comments = comments;
    report.overall_comment = outcome.overall_comment.filter(|c| !c.trim().is_empty());

    info!(
        "Analysis of #{} produced {} comments",
        pr.number,
        report.comments.len()
    );
    Ok(report)
}

/// Pick the locale files out of the PR's file list and parse their
/// patches. Entries without patch text (binary, rename-only, too large)
/// and entries whose patch fails to parse are skipped, not fatal.
fn select_and_parse(
    files: &[PullRequestFile],
    matcher: &LocaleMatcher,
    max_files: usize,
) -> Vec<FilePatch> {
    let mut patches = Vec::new();
    for file in files {
        if !matcher.is_locale_file(&file.filename) {
            debug!("Skipping non-locale file {}", file.filename);
            continue;
        }
        if patches.len() >= max_files {
            warn!("File limit ({}) reached, skipping {}", max_files, file.filename);
            continue;
        }
        let Some(patch_text) = file.patch.as_deref() else {
            debug!(
                "Skipping {} (no patch: binary, rename-only, or too large)",
                file.filename
            );
            continue;
        };
        match parse_file_patch(file.filename.clone(), patch_text) {
            Ok(mut patch) => {
                patch.status = FileStatus::parse(&file.status);
                debug!(
                    "Parsed locale patch {} ({}, +{} -{})",
                    patch.filename,
                    patch.status.as_char(),
                    patch.additions,
                    patch.deletions
                );
                patches.push(patch);
            }
            Err(e) => warn!("Skipping {}: {}", file.filename, e),
        }
    }
    patches
}

/// Load the reference document through the TTL cache, when configured.
fn load_reference(config: &AppConfig) -> Result<Option<String>> {
    let Some(path) = &config.reference_path else {
        return Ok(None);
    };
    let ttl = Duration::from_secs(config.reference_ttl_hours * 60 * 60);
    let cache = ReferenceCache::new(i18n_config::paths::reference_cache_path()?, ttl);
    let source = path.clone();
    let content = cache.load_with(move || {
        std::fs::read_to_string(&source)
            .with_context(|| format!("Failed to read reference document {}", source))
    })?;
    Ok(Some(content))
}

/// Validate the model's comments against the anchor map and translate
/// them into report records carrying both anchor forms.
fn filter_comments(
    comments: Vec<ModelComment>,
    anchors: &AnchorMap,
    marker: &str,
) -> (Vec<ReportComment>, usize) {
    let mut kept = Vec::new();
    let mut dropped = 0usize;
    for comment in comments {
        match anchors.lookup(&comment.filename, comment.diff_position) {
            Some(line) => kept.push(ReportComment {
                path: line.filename.clone(),
                diff_position: line.diff_position,
                line: line.new_line,
                side: "RIGHT".to_string(),
                body: format!("{}\n\n{}", comment.message.trim(), marker),
            }),
            None => {
                debug!(
                    "Dropping comment with unknown anchor {}:{}",
                    comment.filename, comment.diff_position
                );
                dropped += 1;
            }
        }
    }
    (kept, dropped)
}
