//! Unified diff parser: single left-to-right pass per file.
//!
//! The accumulator walks the patch body once, resetting the old/new line
//! counters from each hunk header and assigning every content line its
//! `diff_position` ordinal. Line content that itself begins with `@@`,
//! `+++`, or `---` is an inherent ambiguity of the unified diff format and
//! is not disambiguated here.

use crate::model::{FilePatch, FileStatus, Hunk, PatchLine};
use thiserror::Error;

/// Errors that can occur during diff parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A `@@ ... @@` line failed to match the hunk header grammar.
    /// This corrupts all subsequent counting for the file, so the whole
    /// file's parse is aborted.
    #[error("malformed hunk header: {line:?}")]
    MalformedHunkHeader { line: String },
}

/// Ranges parsed from a `@@ -oldStart,oldCount +newStart,newCount @@` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
}

fn malformed(line: &str) -> ParseError {
    ParseError::MalformedHunkHeader {
        line: line.to_string(),
    }
}

/// Parse a hunk header line.
///
/// Counts default to 1 when the comma-delimited part is absent
/// (`@@ -5 +5 @@` means one line on each side). Trailing section text
/// after the closing `@@` is ignored.
pub fn parse_hunk_header(line: &str) -> Result<HunkRange, ParseError> {
    let rest = line.strip_prefix("@@ -").ok_or_else(|| malformed(line))?;
    let (ranges, _section) = rest.split_once(" @@").ok_or_else(|| malformed(line))?;
    let (old, new) = ranges.split_once(" +").ok_or_else(|| malformed(line))?;
    let (old_start, old_count) = parse_range(old).ok_or_else(|| malformed(line))?;
    let (new_start, new_count) = parse_range(new).ok_or_else(|| malformed(line))?;
    Ok(HunkRange {
        old_start,
        old_count,
        new_start,
        new_count,
    })
}

fn parse_range(s: &str) -> Option<(u32, u32)> {
    match s.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((s.parse().ok()?, 1)),
    }
}

/// Classification of one raw physical patch-body line.
enum RawLine<'a> {
    Added(&'a str),
    Deleted(&'a str),
    Context(&'a str),
    Metadata,
}

/// Classify one raw line from the patch body. Never fails; unrecognized
/// non-empty lines (`diff --git`, `index `, `+++`, `---`, mail headers,
/// `\ No newline at end of file`, ...) are metadata and consume nothing.
fn classify_line(line: &str) -> RawLine<'_> {
    if line.is_empty() {
        // A bare blank line inside a hunk represents an unchanged blank
        // line, not end of input.
        return RawLine::Context("");
    }
    if let Some(rest) = line.strip_prefix('+') {
        if !line.starts_with("+++") {
            return RawLine::Added(rest);
        }
    } else if let Some(rest) = line.strip_prefix('-') {
        if !line.starts_with("---") {
            return RawLine::Deleted(rest);
        }
    } else if let Some(rest) = line.strip_prefix(' ') {
        return RawLine::Context(rest);
    }
    RawLine::Metadata
}

/// Parse the patch text of a single file, as delivered per entry by a
/// pull-request files API (hunks only, no `diff --git` framing).
///
/// An empty patch yields a `FilePatch` with no hunks.
pub fn parse_file_patch(
    filename: impl Into<String>,
    patch: &str,
) -> Result<FilePatch, ParseError> {
    let mut file = FilePatch::new(filename);
    let lines: Vec<&str> = patch.lines().collect();
    accumulate(&mut file, &lines)?;
    file.recalculate_stats();
    Ok(file)
}

/// Parse a complete unified diff, possibly spanning multiple files.
///
/// File sections are split on `diff --git` boundaries; input without such
/// framing is treated as a single file section. Empty input yields an
/// empty list, not an error.
pub fn parse_unified_diff(diff_text: &str) -> Result<Vec<FilePatch>, ParseError> {
    if diff_text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut chunks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in diff_text.lines() {
        if line.starts_with("diff --git ") && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    let mut files = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        files.push(parse_file_chunk(chunk)?);
    }
    Ok(files)
}

/// Parse one file section of a multi-file diff: resolve the paths and
/// status from the file headers, then run the accumulator over the body.
fn parse_file_chunk(lines: &[&str]) -> Result<FilePatch, ParseError> {
    let mut source = String::new();
    let mut target = String::new();

    for line in lines {
        if line.starts_with("@@") {
            break;
        }
        if let Some(rest) = line.strip_prefix("--- ") {
            source = clean_path(rest);
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            target = clean_path(rest);
        } else if let Some(rest) = line.strip_prefix("diff --git ") {
            // Fallback for sections without ---/+++ headers (e.g. pure
            // renames). The ---/+++ headers win when present.
            if let Some((a, b)) = split_git_paths(rest) {
                if source.is_empty() {
                    source = clean_path(a);
                }
                if target.is_empty() {
                    target = clean_path(b);
                }
            }
        }
    }

    let filename = if target.is_empty() || target == "/dev/null" {
        source.clone()
    } else {
        target.clone()
    };

    let mut file = FilePatch::new(filename);
    file.status = determine_status(&source, &target);
    if !source.is_empty() && source != "/dev/null" && source != file.filename {
        file.old_path = Some(source);
    }

    accumulate(&mut file, lines)?;
    file.recalculate_stats();
    Ok(file)
}

/// The single-pass position/line accumulator.
///
/// Counters start "one before" each hunk's declared start so that the
/// first content line increments into the correct value. A later hunk's
/// header is authoritative: the counters are reset from it rather than
/// continued from the previous hunk (unchanged lines between hunks are
/// not shown in the patch).
fn accumulate(file: &mut FilePatch, lines: &[&str]) -> Result<(), ParseError> {
    let mut diff_position = 0u32;
    let mut old_line = 0u32;
    let mut new_line = 0u32;

    for &raw in lines {
        if raw.starts_with("@@") {
            let range = parse_hunk_header(raw)?;
            old_line = range.old_start.saturating_sub(1);
            new_line = range.new_start.saturating_sub(1);
            file.hunks.push(Hunk::new(
                range.old_start,
                range.old_count,
                range.new_start,
                range.new_count,
            ));
            continue;
        }

        // File-level metadata precedes the first hunk; nothing to record.
        let Some(hunk) = file.hunks.last_mut() else {
            continue;
        };

        match classify_line(raw) {
            RawLine::Metadata => {}
            RawLine::Added(text) => {
                diff_position += 1;
                new_line += 1;
                hunk.lines.push(PatchLine::added(text, diff_position, new_line));
            }
            RawLine::Deleted(text) => {
                diff_position += 1;
                old_line += 1;
                hunk.lines.push(PatchLine::deleted(text, diff_position, old_line));
            }
            RawLine::Context(text) => {
                diff_position += 1;
                old_line += 1;
                new_line += 1;
                hunk.lines
                    .push(PatchLine::context(text, diff_position, old_line, new_line));
            }
        }
    }

    Ok(())
}

fn determine_status(source: &str, target: &str) -> FileStatus {
    if source == "/dev/null" || source.is_empty() {
        FileStatus::Added
    } else if target == "/dev/null" || target.is_empty() {
        FileStatus::Deleted
    } else if source != target {
        FileStatus::Renamed
    } else {
        FileStatus::Modified
    }
}

/// Split the `a/old b/new` tail of a `diff --git` line.
fn split_git_paths(rest: &str) -> Option<(&str, &str)> {
    let mut parts = rest.split_whitespace();
    let a = parts.next()?;
    let b = parts.next()?;
    Some((a, b))
}

/// Clean a path by removing the a/ or b/ prefix from git diff output.
fn clean_path(path: &str) -> String {
    let path = path.trim();
    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }
    path.to_string()
}
