//! The review report store.
//!
//! One JSON document per pull request, written after analysis and read
//! back to drive comment posting. Each comment record carries both anchor
//! forms (`diff_position` and `line` + `side`) so either sink addressing
//! mode can be replayed from the same report.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current report schema version. Loading any other version fails.
pub const REPORT_SCHEMA_VERSION: u32 = 2;

/// The analysis result for one pull request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewReport {
    /// Schema version of this document.
    pub schema_version: u32,
    /// Pull request number the report belongs to.
    pub pr_number: u64,
    /// HEAD commit the analysis ran against; comments are posted on it.
    pub head_sha: String,
    /// Line-anchored review comments.
    pub comments: Vec<ReportComment>,
    /// PR-level summary comment, if the model produced one.
    pub overall_comment: Option<String>,
    /// When the analysis ran.
    pub generated_at: DateTime<Utc>,
}

/// One review comment with both anchor forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportComment {
    /// File path in the new tree.
    pub path: String,
    /// Legacy position anchor within the file's patch body.
    pub diff_position: u32,
    /// Absolute line number in the new file version.
    pub line: u32,
    /// Diff side of the line anchor ("RIGHT" for added lines).
    pub side: String,
    /// Comment body (markdown).
    pub body: String,
}

impl ReviewReport {
    /// Create an empty report for a pull request.
    pub fn new(pr_number: u64, head_sha: impl Into<String>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            pr_number,
            head_sha: head_sha.into(),
            comments: Vec::new(),
            overall_comment: None,
            generated_at: Utc::now(),
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report, rejecting unknown schema versions.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report from {}", path.display()))?;
        let report: ReviewReport = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse report {}", path.display()))?;

        if report.schema_version != REPORT_SCHEMA_VERSION {
            bail!(
                "Unsupported report schema version {} in {} (expected {})",
                report.schema_version,
                path.display(),
                REPORT_SCHEMA_VERSION
            );
        }
        Ok(report)
    }

    /// Whether there is anything worth posting.
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.overall_comment.is_none()
    }
}
