//! Diff data structures representing one file's patch within a pull request.

/// The full patch for one file, reconstructed from unified diff text.
///
/// Constructed fresh from one raw patch string per parse and never mutated
/// afterwards by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    /// Path of the file as it exists in the new tree.
    pub filename: String,
    /// Previous path (if renamed).
    pub old_path: Option<String>,
    /// File status.
    pub status: FileStatus,
    /// Change hunks, in document order.
    pub hunks: Vec<Hunk>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl FilePatch {
    /// Create an empty file patch.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            old_path: None,
            status: FileStatus::Modified,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
        }
    }

    /// All patch lines across hunks, in document order.
    pub fn lines(&self) -> impl Iterator<Item = &PatchLine> {
        self.hunks.iter().flat_map(|h| h.lines.iter())
    }

    /// Added lines only — the lines eligible to host a review comment.
    pub fn added_lines(&self) -> impl Iterator<Item = &PatchLine> {
        self.lines().filter(|l| l.kind == LineKind::Added)
    }

    /// Recalculate line statistics from hunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self.lines().filter(|l| l.kind == LineKind::Added).count();
        self.deletions = self.lines().filter(|l| l.kind == LineKind::Deleted).count();
    }
}

/// File status in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    /// Parse the status string used by the pull-request files API.
    pub fn parse(status: &str) -> Self {
        match status {
            "added" => FileStatus::Added,
            "removed" | "deleted" => FileStatus::Deleted,
            "renamed" => FileStatus::Renamed,
            _ => FileStatus::Modified,
        }
    }

    /// Single-character representation for log output.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }
}

/// A contiguous region of changes (one `@@ ... @@` block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Header line (e.g., "@@ -10,5 +10,7 @@").
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in the old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in the new version.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<PatchLine>,
}

impl Hunk {
    /// Create a new hunk with the given ranges.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_count, new_start, new_count
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }
}

/// A single content line in the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content without the leading +/-/space marker.
    pub text: String,
    /// 1-based ordinal within the file's cumulative patch body.
    /// Counts content lines only; hunk headers and metadata are not counted.
    pub diff_position: u32,
    /// Line number in the old file (for Context and Deleted).
    pub old_line: Option<u32>,
    /// Line number in the new file (for Context and Added).
    pub new_line: Option<u32>,
}

impl PatchLine {
    /// Create a context line (present in both file versions).
    pub fn context(
        text: impl Into<String>,
        diff_position: u32,
        old_line: u32,
        new_line: u32,
    ) -> Self {
        Self {
            kind: LineKind::Context,
            text: text.into(),
            diff_position,
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create an added line (exists only in the new file).
    pub fn added(text: impl Into<String>, diff_position: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Added,
            text: text.into(),
            diff_position,
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a deleted line (exists only in the old file).
    pub fn deleted(text: impl Into<String>, diff_position: u32, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deleted,
            text: text.into(),
            diff_position,
            old_line: Some(old_line),
            new_line: None,
        }
    }
}

/// Content line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line present in both versions.
    Context,
    /// Added line (+).
    Added,
    /// Removed line (-).
    Deleted,
}
