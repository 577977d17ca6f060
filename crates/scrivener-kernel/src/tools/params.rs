//! Tool input parameters.
//!
//! Field names follow the camelCase tool-call contract. Models mix up
//! `path` and `filePath`, so each accepts the other as an alias.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Create or overwrite a file with full content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileParams {
    /// File path to write (relative to the workspace root)
    #[serde(alias = "filePath")]
    pub path: String,
    /// Full file content
    pub content: String,
}

/// Read a file, optionally a line window of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileParams {
    /// File path to read
    #[serde(alias = "filePath")]
    pub path: String,
    /// First line to return (1-indexed, inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    /// Last line to return (1-indexed, inclusive; clamped to the file length)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    /// Line window as "N-M" (used when startLine/endLine are absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<String>,
}

/// Apply a SEARCH/REPLACE block to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditFileParams {
    /// File path to edit
    #[serde(alias = "path")]
    pub file_path: String,
    /// Block of the form "<<<<<<< SEARCH\n...\n=======\n...\n>>>>>>> REPLACE"
    pub search_replace_block: String,
    /// Replace every verbatim occurrence (default: false)
    #[serde(default)]
    pub replace_all: bool,
}

/// Replace literal text in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceStringParams {
    /// File path to modify
    #[serde(alias = "path")]
    pub file_path: String,
    /// Text to find
    pub old_string: String,
    /// Replacement text
    pub new_string: String,
    /// Replace every occurrence (default: false)
    #[serde(default)]
    pub replace_all: bool,
    /// Match ignoring case (default: false)
    #[serde(default)]
    pub case_insensitive: bool,
}

/// Delete one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileParams {
    /// File path to delete
    #[serde(alias = "filePath")]
    pub path: String,
}

/// Delete every file under a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFolderParams {
    /// Folder path; every file beneath it is removed
    #[serde(alias = "folderPath")]
    pub path: String,
}

/// List files, optionally under a path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesParams {
    /// Path prefix to list (default: whole workspace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Regex search across file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrepSearchParams {
    /// Regular expression, matched against each line
    pub pattern: String,
    /// Path prefix to search under (default: whole workspace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Case-sensitive matching (default: false)
    #[serde(default)]
    pub case_sensitive: bool,
}
