//! Tool results and their JSON response shape.

use scrivener_types::{DiffLine, DiffStats, FileAction, MatchStrategy};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::{Result, WorkspaceError};
use crate::workspace::{GrepHit, ListEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileOutput {
    pub path: String,
    pub action: FileAction,
    pub bytes: usize,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<DiffLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_stats: Option<DiffStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileOutput {
    pub path: String,
    pub content: String,
    pub total_lines: usize,
    pub start_line: usize,
    pub end_line: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Shared by `edit_file` (`edited`) and `client_replace_string_in_file` (`modified`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutput {
    pub file_path: String,
    pub action: FileAction,
    pub match_strategy: MatchStrategy,
    pub replacements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Vec<DiffLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_stats: Option<DiffStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFileOutput {
    pub path: String,
    pub action: FileAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFolderOutput {
    pub path: String,
    pub files_deleted: usize,
    pub deleted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesOutput {
    pub files: Vec<ListEntry>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrepSearchOutput {
    pub results: Vec<GrepHit>,
    pub total_matches: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

/// Successful result of any tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Write(WriteFileOutput),
    Read(ReadFileOutput),
    Edit(EditOutput),
    Delete(DeleteFileOutput),
    DeleteFolder(DeleteFolderOutput),
    List(ListFilesOutput),
    Grep(GrepSearchOutput),
}

/// Shape a tool result as `{success: true, ...}` or the error's failure body.
pub fn to_response(result: &Result<ToolOutput>) -> Value {
    match result {
        Ok(output) => match serde_json::to_value(output) {
            Ok(Value::Object(mut body)) => {
                body.insert("success".into(), Value::Bool(true));
                Value::Object(body)
            }
            Ok(other) => json!({ "success": true, "result": other }),
            Err(e) => WorkspaceError::InvalidParams(format!("unserializable result: {e}")).to_response(),
        },
        Err(e) => e.to_response(),
    }
}
