//! Line diff records.
//!
//! Produced by the kernel's LCS diff, consumed by whatever draws the
//! before/after view. Line numbers are 1-indexed.

use serde::{Deserialize, Serialize};

/// Tag for one diff line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both texts.
    Context,
    /// Only in the new text.
    Add,
    /// Only in the old text.
    Remove,
}

impl DiffKind {
    /// Single-character gutter sign used by unified renderings.
    pub fn sign(&self) -> char {
        match self {
            DiffKind::Context => ' ',
            DiffKind::Add => '+',
            DiffKind::Remove => '-',
        }
    }
}

/// One line of a diff.
///
/// `old_line` is absent on [`DiffKind::Add`], `new_line` on
/// [`DiffKind::Remove`]; context lines carry both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub kind: DiffKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<u32>,
    pub text: String,
}

impl DiffLine {
    pub fn context(old_line: u32, new_line: u32, text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Context,
            old_line: Some(old_line),
            new_line: Some(new_line),
            text: text.into(),
        }
    }

    pub fn add(new_line: u32, text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Add,
            old_line: None,
            new_line: Some(new_line),
            text: text.into(),
        }
    }

    pub fn remove(old_line: u32, text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Remove,
            old_line: Some(old_line),
            new_line: None,
            text: text.into(),
        }
    }
}

/// Added/removed line counts for a diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl DiffStats {
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::default(), |mut stats, line| {
            match line.kind {
                DiffKind::Add => stats.lines_added += 1,
                DiffKind::Remove => stats.lines_removed += 1,
                DiffKind::Context => {}
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_omits_old_number_on_wire() {
        let json = serde_json::to_value(DiffLine::add(3, "x")).unwrap();
        assert_eq!(json["kind"], "add");
        assert_eq!(json["newLine"], 3);
        assert!(json.get("oldLine").is_none());
    }

    #[test]
    fn test_stats_counts_changes() {
        let lines = vec![
            DiffLine::context(1, 1, "a"),
            DiffLine::remove(2, "b"),
            DiffLine::add(2, "c"),
            DiffLine::add(3, "d"),
        ];
        let stats = DiffStats::from_lines(&lines);
        assert_eq!(stats.lines_added, 2);
        assert_eq!(stats.lines_removed, 1);
    }
}
