//! Error types for workspace operations.
//!
//! These errors are returned to models, not just logged, so each variant
//! carries what the caller needs to retry: suggested paths, the search text
//! that failed, the file length that a range overshot.

use serde_json::{Map, Value, json};
use thiserror::Error;

/// Errors that can occur while resolving, reading, or mutating workspace files.
#[derive(Debug, Error, PartialEq)]
pub enum WorkspaceError {
    /// No record resolved for the path. Ambiguous matches surface here too.
    #[error("{}", path_not_found_message(.path, .suggestions))]
    PathNotFound {
        /// The path as the caller supplied it.
        path: String,
        /// Up to a few stored paths that look related.
        suggestions: Vec<String>,
    },

    /// The edit block had no parseable search or replace content.
    #[error("invalid search/replace block: expected <<<<<<< SEARCH, =======, >>>>>>> REPLACE markers with content")]
    InvalidPatchFormat,

    /// Neither exact nor whitespace-flexible matching found the search text.
    #[error("search text not found in {path}: {snippet:?}")]
    SearchTextNotFound {
        /// Resolved path of the file that was searched.
        path: String,
        /// Leading slice of the attempted search text.
        snippet: String,
    },

    /// A grep pattern failed to compile.
    #[error("invalid regex pattern {pattern:?}: {reason}")]
    InvalidRegexPattern {
        pattern: String,
        reason: String,
    },

    /// Content operation targeted a directory record.
    #[error("is a directory: {0}")]
    IsADirectory(String),

    /// The path normalizes to nothing usable.
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    /// A read range starts past the end of the file.
    #[error("line {requested} is out of range (file has {total} lines)")]
    LineOutOfRange {
        requested: u32,
        total: u32,
    },

    /// `delete_folder` matched no stored keys.
    #[error("no files found under folder: {0}")]
    EmptyPrefix(String),

    /// Invalid operation parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

fn path_not_found_message(path: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("file not found: {path}")
    } else {
        format!(
            "file not found: {path}. Did you mean: {}?",
            suggestions.join(", ")
        )
    }
}

impl WorkspaceError {
    /// Create a PathNotFound error.
    pub fn path_not_found(path: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::PathNotFound {
            path: path.into(),
            suggestions,
        }
    }

    /// Create a SearchTextNotFound error, clipping the echoed search text.
    pub fn search_not_found(path: impl Into<String>, search: &str, max_chars: usize) -> Self {
        Self::SearchTextNotFound {
            path: path.into(),
            snippet: search.chars().take(max_chars).collect(),
        }
    }

    /// Create a LineOutOfRange error.
    pub fn line_out_of_range(requested: u32, total: u32) -> Self {
        Self::LineOutOfRange { requested, total }
    }

    /// Stable machine-readable tag for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathNotFound { .. } => "path_not_found",
            Self::InvalidPatchFormat => "invalid_patch_format",
            Self::SearchTextNotFound { .. } => "search_text_not_found",
            Self::InvalidRegexPattern { .. } => "invalid_regex_pattern",
            Self::IsADirectory(_) => "is_a_directory",
            Self::InvalidPath(_) => "invalid_path",
            Self::LineOutOfRange { .. } => "line_out_of_range",
            Self::EmptyPrefix(_) => "empty_prefix",
            Self::InvalidParams(_) => "invalid_params",
        }
    }

    /// Structured failure response: `{success: false, error, code, ...}`.
    ///
    /// Path misses carry `suggestions`, search misses carry `searchStr`.
    pub fn to_response(&self) -> Value {
        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(false));
        body.insert("error".into(), Value::String(self.to_string()));
        body.insert("code".into(), Value::String(self.code().into()));
        match self {
            Self::PathNotFound { suggestions, .. } if !suggestions.is_empty() => {
                body.insert("suggestions".into(), json!(suggestions));
            }
            Self::SearchTextNotFound { snippet, .. } => {
                body.insert("searchStr".into(), Value::String(snippet.clone()));
            }
            _ => {}
        }
        Value::Object(body)
    }
}

/// Result type for workspace operations.
pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_lists_suggestions() {
        let err = WorkspaceError::path_not_found(
            "a.ts",
            vec!["src/a.ts".into(), "lib/a.ts".into()],
        );
        let msg = err.to_string();
        assert!(msg.contains("a.ts"));
        assert!(msg.contains("Did you mean: src/a.ts, lib/a.ts?"));

        let bare = WorkspaceError::path_not_found("x.rs", Vec::new());
        assert_eq!(bare.to_string(), "file not found: x.rs");
    }

    #[test]
    fn test_search_snippet_is_clipped() {
        let long = "x".repeat(250);
        let err = WorkspaceError::search_not_found("app.ts", &long, 100);
        match &err {
            WorkspaceError::SearchTextNotFound { snippet, .. } => assert_eq!(snippet.len(), 100),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_response_shape() {
        let resp = WorkspaceError::path_not_found("a.ts", vec!["src/a.ts".into()]).to_response();
        assert_eq!(resp["success"], false);
        assert_eq!(resp["code"], "path_not_found");
        assert_eq!(resp["suggestions"][0], "src/a.ts");

        let resp = WorkspaceError::search_not_found("a.ts", "needle", 100).to_response();
        assert_eq!(resp["searchStr"], "needle");
        assert!(resp.get("suggestions").is_none());

        let resp = WorkspaceError::InvalidPatchFormat.to_response();
        assert!(resp.get("searchStr").is_none());
        assert!(resp["error"].as_str().unwrap().contains("SEARCH"));
    }
}
