//! Unified diff parsing and review-anchor line mapping.
//!
//! This crate converts the textual patch of a pull request file into a
//! precise correspondence between review-comment anchors and line numbers
//! in the new version of the file. Two anchor addressing modes are derived
//! from a single parse:
//!
//! - `diff_position` — the 1-based ordinal of a content line within the
//!   cumulative patch body for one file (the legacy `position` anchor).
//! - `new_line` — the absolute 1-based line number in the new file version
//!   (the `line` + `side: RIGHT` anchor).
//!
//! # Position policy
//!
//! `diff_position` counts only content lines (added, deleted, context).
//! Hunk headers and file-level metadata never consume an ordinal. Verify
//! this against the targeted review API version before switching sinks.
//!
//! The parser is a pure synchronous computation: no I/O, no shared state,
//! safe to run concurrently on independent inputs.

pub mod anchors;
pub mod model;
pub mod parser;

pub use anchors::{added_lines, AddedLine, AnchorMap};
pub use model::{FilePatch, FileStatus, Hunk, LineKind, PatchLine};
pub use parser::{parse_file_patch, parse_hunk_header, parse_unified_diff, ParseError};
