//! Tool-call surface over workspace sessions.
//!
//! Every call is a [`ToolCall`] variant, so dispatch is an exhaustive match
//! rather than a string switch. On the wire a call is
//! `{"tool": "<name>", "input": {...}}`:
//!
//! ```text
//! write_file                      {path, content}
//! read_file                       {path, startLine?, endLine?, lineRange?}
//! edit_file                       {filePath, searchReplaceBlock, replaceAll?}
//! client_replace_string_in_file   {filePath, oldString, newString, replaceAll?, caseInsensitive?}
//! delete_file                     {path}
//! delete_folder                   {path}
//! list_files                      {path?}
//! grep_search                     {pattern, path?, caseSensitive?}
//! ```
//!
//! Responses are `{success: true, ...}` or `{success: false, error, ...}`.

mod executor;
mod output;
mod params;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, WorkspaceError};

pub use executor::ToolExecutor;
pub use output::{
    DeleteFileOutput, DeleteFolderOutput, EditOutput, GrepSearchOutput, ListFilesOutput,
    ReadFileOutput, ToolOutput, WriteFileOutput, to_response,
};
pub use params::{
    DeleteFileParams, DeleteFolderParams, EditFileParams, GrepSearchParams, ListFilesParams,
    ReadFileParams, ReplaceStringParams, WriteFileParams,
};

/// One tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "input")]
pub enum ToolCall {
    #[serde(rename = "write_file")]
    Write(WriteFileParams),
    #[serde(rename = "read_file")]
    Read(ReadFileParams),
    #[serde(rename = "edit_file")]
    Edit(EditFileParams),
    #[serde(rename = "client_replace_string_in_file")]
    LiteralReplace(ReplaceStringParams),
    #[serde(rename = "delete_file")]
    Delete(DeleteFileParams),
    #[serde(rename = "delete_folder")]
    DeleteFolder(DeleteFolderParams),
    #[serde(rename = "list_files")]
    List(ListFilesParams),
    #[serde(rename = "grep_search")]
    Grep(GrepSearchParams),
}

/// Name, description, and input schema of one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolCall {
    /// Wire name of this call's tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::Write(_) => "write_file",
            ToolCall::Read(_) => "read_file",
            ToolCall::Edit(_) => "edit_file",
            ToolCall::LiteralReplace(_) => "client_replace_string_in_file",
            ToolCall::Delete(_) => "delete_file",
            ToolCall::DeleteFolder(_) => "delete_folder",
            ToolCall::List(_) => "list_files",
            ToolCall::Grep(_) => "grep_search",
        }
    }

    /// Parse a `{"tool", "input"}` object.
    ///
    /// A missing `input` is treated as `{}`, and an `input` given as a JSON
    /// string is decoded first; several model APIs deliver arguments that way.
    pub fn from_json(mut value: Value) -> Result<Self> {
        if let Value::Object(body) = &mut value {
            match body.get("input") {
                None | Some(Value::Null) => {
                    body.insert("input".into(), Value::Object(Default::default()));
                }
                Some(Value::String(raw)) => {
                    let decoded: Value = serde_json::from_str(raw).map_err(|e| {
                        WorkspaceError::InvalidParams(format!("input is not valid JSON: {e}"))
                    })?;
                    body.insert("input".into(), decoded);
                }
                Some(_) => {}
            }
        }
        serde_json::from_value(value).map_err(|e| WorkspaceError::InvalidParams(e.to_string()))
    }

    /// Every tool with its JSON Schema, for advertising to a model.
    pub fn catalogue() -> Vec<ToolSpec> {
        vec![
            tool_spec::<WriteFileParams>(
                "write_file",
                "Create a file or overwrite an existing one with full content",
            ),
            tool_spec::<ReadFileParams>(
                "read_file",
                "Read a file. Long files are truncated unless a line range is given",
            ),
            tool_spec::<EditFileParams>(
                "edit_file",
                "Edit a file with a SEARCH/REPLACE block; tolerates indentation drift",
            ),
            tool_spec::<ReplaceStringParams>(
                "client_replace_string_in_file",
                "Replace literal text in a file, optionally ignoring case",
            ),
            tool_spec::<DeleteFileParams>("delete_file", "Delete a file"),
            tool_spec::<DeleteFolderParams>("delete_folder", "Delete every file under a folder"),
            tool_spec::<ListFilesParams>("list_files", "List files with type and size"),
            tool_spec::<GrepSearchParams>(
                "grep_search",
                "Search file contents with a regular expression, line by line",
            ),
        ]
    }
}

fn tool_spec<T: JsonSchema>(name: &'static str, description: &'static str) -> ToolSpec {
    ToolSpec {
        name,
        description,
        input_schema: serde_json::to_value(schemars::schema_for!(T)).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_edit_call() {
        let call = ToolCall::from_json(json!({
            "tool": "edit_file",
            "input": {"filePath": "app.ts", "searchReplaceBlock": "x", "replaceAll": true}
        }))
        .unwrap();
        assert_eq!(
            call,
            ToolCall::Edit(EditFileParams {
                file_path: "app.ts".into(),
                search_replace_block: "x".into(),
                replace_all: true,
            })
        );
        assert_eq!(call.name(), "edit_file");
    }

    #[test]
    fn test_missing_input_defaults_to_empty_object() {
        let call = ToolCall::from_json(json!({"tool": "list_files"})).unwrap();
        assert_eq!(call, ToolCall::List(ListFilesParams { path: None }));
    }

    #[test]
    fn test_string_input_is_decoded() {
        let call = ToolCall::from_json(json!({
            "tool": "delete_file",
            "input": "{\"path\": \"a.ts\"}"
        }))
        .unwrap();
        assert_eq!(call, ToolCall::Delete(DeleteFileParams { path: "a.ts".into() }));
    }

    #[test]
    fn test_path_aliases() {
        let call = ToolCall::from_json(json!({
            "tool": "client_replace_string_in_file",
            "input": {"path": "a.ts", "oldString": "a", "newString": "b"}
        }))
        .unwrap();
        match call {
            ToolCall::LiteralReplace(p) => {
                assert_eq!(p.file_path, "a.ts");
                assert!(!p.replace_all);
                assert!(!p.case_insensitive);
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tool_and_bad_params() {
        let err = ToolCall::from_json(json!({"tool": "rm_rf", "input": {}})).unwrap_err();
        assert!(matches!(err, WorkspaceError::InvalidParams(_)));

        let err = ToolCall::from_json(json!({"tool": "write_file", "input": {"path": "a"}})).unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_catalogue_covers_every_tool() {
        let catalogue = ToolCall::catalogue();
        let names: Vec<&str> = catalogue.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "write_file",
                "read_file",
                "edit_file",
                "client_replace_string_in_file",
                "delete_file",
                "delete_folder",
                "list_files",
                "grep_search",
            ]
        );
        let edit = &catalogue[2];
        assert!(edit.input_schema["properties"]["searchReplaceBlock"].is_object());
    }
}
