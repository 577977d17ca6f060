//! File record tags shared between the engine and result renderers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Whether a workspace record is a file or a directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EntryKind {
    /// Regular text file.
    #[default]
    File,
    /// Directory marker; carries no content.
    #[strum(to_string = "directory", serialize = "dir")]
    Directory,
}

impl EntryKind {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// What a mutating tool call did to its target record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FileAction {
    /// A new record was created by `write_file`.
    Created,
    /// An existing record was overwritten by `write_file`.
    Updated,
    /// A search/replace block was applied by `edit_file`.
    Edited,
    /// A literal replacement was applied.
    Modified,
    /// The record was removed.
    Deleted,
}

/// How an edit located the text it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchStrategy {
    /// Verbatim substring of the file.
    Exact,
    /// Line window matched after trimming each line.
    WhitespaceFlexible,
    /// Case-sensitive literal replacement.
    Literal,
    /// Case-folded literal replacement.
    CaseInsensitive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_strings() {
        assert_eq!(EntryKind::File.to_string(), "file");
        assert_eq!(EntryKind::Directory.to_string(), "directory");
        assert_eq!(EntryKind::from_str("DIR"), Some(EntryKind::Directory));
        assert_eq!(EntryKind::from_str("file"), Some(EntryKind::File));
        assert_eq!(EntryKind::from_str("socket"), None);
    }

    #[test]
    fn test_action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FileAction::Created).unwrap(), "\"created\"");
        assert_eq!(FileAction::Modified.to_string(), "modified");
    }

    #[test]
    fn test_strategy_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MatchStrategy::WhitespaceFlexible).unwrap(),
            "\"whitespace_flexible\""
        );
        assert_eq!(MatchStrategy::CaseInsensitive.to_string(), "case_insensitive");
    }
}
