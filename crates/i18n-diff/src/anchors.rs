//! Query surface over parsed patches: the added-line anchor map.
//!
//! Added lines are the only lines eligible to host a review comment in
//! this workflow. Each record carries both anchor forms — the legacy
//! `diff_position` ordinal and the absolute `new_line` number — so a
//! comment sink can be addressed in either mode from the same parse.

use crate::model::{FilePatch, LineKind};
use std::collections::HashMap;

/// One added line, with everything a comment sink needs to anchor on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedLine {
    /// Path of the file in the new tree.
    pub filename: String,
    /// Legacy position anchor within the file's patch body.
    pub diff_position: u32,
    /// Absolute line number in the new file version (side RIGHT).
    pub new_line: u32,
    /// Line content without the leading marker.
    pub text: String,
}

/// Collect the added lines of one or more file patches, in document order.
pub fn added_lines(files: &[FilePatch]) -> Vec<AddedLine> {
    files
        .iter()
        .flat_map(|file| {
            file.lines()
                .filter(|l| l.kind == LineKind::Added)
                .map(|l| AddedLine {
                    filename: file.filename.clone(),
                    diff_position: l.diff_position,
                    // Added lines always carry a new-file line number.
                    new_line: l.new_line.unwrap_or(0),
                    text: l.text.clone(),
                })
        })
        .collect()
}

/// Lookup table from `(filename, diff_position)` anchors to added lines.
///
/// A missing anchor (e.g. one the review model hallucinated) is a
/// filtering condition, not an error: `lookup` returns `None` and the
/// caller discards the comment.
#[derive(Debug, Default)]
pub struct AnchorMap {
    lines: Vec<AddedLine>,
    index: HashMap<(String, u32), usize>,
}

impl AnchorMap {
    /// Build the map from parsed file patches.
    pub fn new(files: &[FilePatch]) -> Self {
        let lines = added_lines(files);
        let index = lines
            .iter()
            .enumerate()
            .map(|(i, l)| ((l.filename.clone(), l.diff_position), i))
            .collect();
        Self { lines, index }
    }

    /// Resolve an anchor to its added line, if it exists.
    pub fn lookup(&self, filename: &str, diff_position: u32) -> Option<&AddedLine> {
        self.index
            .get(&(filename.to_string(), diff_position))
            .map(|&i| &self.lines[i])
    }

    /// All added lines, in document order.
    pub fn lines(&self) -> &[AddedLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_file_patch;
    use pretty_assertions::assert_eq;

    fn sample_patches() -> Vec<FilePatch> {
        let en = parse_file_patch(
            "locales/en.json",
            "@@ -2,3 +2,2 @@\n unchanged\n-removed\n+added",
        )
        .unwrap();
        let de = parse_file_patch("locales/de.json", "@@ -0,0 +1,2 @@\n+eins\n+zwei").unwrap();
        vec![en, de]
    }

    #[test]
    fn test_added_lines_carry_both_anchor_forms() {
        let lines = added_lines(&sample_patches());
        assert_eq!(
            lines,
            vec![
                AddedLine {
                    filename: "locales/en.json".to_string(),
                    diff_position: 3,
                    new_line: 3,
                    text: "added".to_string(),
                },
                AddedLine {
                    filename: "locales/de.json".to_string(),
                    diff_position: 1,
                    new_line: 1,
                    text: "eins".to_string(),
                },
                AddedLine {
                    filename: "locales/de.json".to_string(),
                    diff_position: 2,
                    new_line: 2,
                    text: "zwei".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_lookup_hit() {
        let map = AnchorMap::new(&sample_patches());
        assert_eq!(map.len(), 3);

        let hit = map.lookup("locales/de.json", 2).unwrap();
        assert_eq!(hit.new_line, 2);
        assert_eq!(hit.text, "zwei");
    }

    #[test]
    fn test_lookup_miss_is_none_not_a_crash() {
        let map = AnchorMap::new(&sample_patches());

        // Deleted and context positions are not valid anchors.
        assert!(map.lookup("locales/en.json", 1).is_none());
        assert!(map.lookup("locales/en.json", 2).is_none());
        // Unknown file, out-of-range position.
        assert!(map.lookup("locales/xx.json", 1).is_none());
        assert!(map.lookup("locales/de.json", 99).is_none());
    }

    #[test]
    fn test_empty_map() {
        let map = AnchorMap::new(&[]);
        assert!(map.is_empty());
        assert!(map.lookup("anything", 1).is_none());
    }
}
