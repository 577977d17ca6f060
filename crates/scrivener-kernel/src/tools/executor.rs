//! Tool dispatch against a session registry.

use std::sync::Arc;

use scrivener_types::{DiffLine, DiffStats, FileAction, SessionKey};
use serde_json::Value;

use super::output::{
    DeleteFileOutput, DeleteFolderOutput, EditOutput, GrepSearchOutput, ListFilesOutput,
    ReadFileOutput, ToolOutput, WriteFileOutput, to_response,
};
use super::params::{EditFileParams, GrepSearchParams, ReadFileParams, ReplaceStringParams};
use super::ToolCall;
use crate::config::EngineConfig;
use crate::diff;
use crate::error::Result;
use crate::session::SessionRegistry;
use crate::workspace::{EditOutcome, LineRange, WorkspaceStore};

/// Runs tool calls, each under its session's lock.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    registry: Arc<SessionRegistry>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Execute one call in the session named by `key`, creating it if needed.
    #[tracing::instrument(skip_all, name = "tool.dispatch", fields(session = %key.short(), tool = call.name()))]
    pub fn execute(&self, key: &SessionKey, call: ToolCall) -> Result<ToolOutput> {
        let session = self.registry.session(key);
        let mut guard = session.lock();
        let store = &mut guard.store;

        let result = match call {
            ToolCall::Write(p) => write_file(store, &p.path, &p.content),
            ToolCall::Read(p) => read_file(store, &p),
            ToolCall::Edit(p) => edit_file(store, &p),
            ToolCall::LiteralReplace(p) => replace_string(store, &p),
            ToolCall::Delete(p) => delete_file(store, &p.path),
            ToolCall::DeleteFolder(p) => delete_folder(store, &p.path),
            ToolCall::List(p) => Ok(list_files(store, p.path.as_deref())),
            ToolCall::Grep(p) => grep_search(store, &p),
        };

        if let Err(e) = &result {
            tracing::debug!(code = e.code(), error = %e, "tool call failed");
        }
        result
    }

    /// Parse, execute, and shape a raw JSON call. Never fails; errors become
    /// `{success: false, ...}` bodies.
    pub fn execute_json(&self, key: &SessionKey, call: Value) -> Value {
        let result = ToolCall::from_json(call).and_then(|call| self.execute(key, call));
        to_response(&result)
    }
}

#[tracing::instrument(name = "tool.write_file", skip(store, content), fields(bytes = content.len()))]
fn write_file(store: &mut WorkspaceStore, path: &str, content: &str) -> Result<ToolOutput> {
    let outcome = store.write(path, content)?;
    let kind = store
        .get(&outcome.path)
        .map(|record| record.kind().to_string())
        .unwrap_or_default();
    let (diff, diff_stats) = match outcome.action {
        FileAction::Updated => attach_diff(store.config(), &outcome.previous, content),
        _ => (None, None),
    };
    Ok(ToolOutput::Write(WriteFileOutput {
        path: outcome.path,
        action: outcome.action,
        bytes: content.len(),
        kind,
        diff,
        diff_stats,
    }))
}

#[tracing::instrument(name = "tool.read_file", skip_all, fields(path = %params.path))]
fn read_file(store: &WorkspaceStore, params: &ReadFileParams) -> Result<ToolOutput> {
    let range = match (&params.line_range, params.start_line, params.end_line) {
        (Some(raw), None, None) => LineRange::parse(raw)?,
        (_, start, end) => LineRange::new(start, end),
    };
    let outcome = store.read(&params.path, range)?;
    let message = outcome.truncated.then(|| {
        format!(
            "File has {} lines; showing lines 1-{}. Pass lineRange (e.g. \"{}-{}\") to read further.",
            outcome.total_lines,
            outcome.end_line,
            outcome.end_line + 1,
            outcome.total_lines.min(outcome.end_line * 2),
        )
    });
    Ok(ToolOutput::Read(ReadFileOutput {
        path: outcome.path,
        content: outcome.content,
        total_lines: outcome.total_lines,
        start_line: outcome.start_line,
        end_line: outcome.end_line,
        truncated: outcome.truncated,
        message,
    }))
}

#[tracing::instrument(name = "tool.edit_file", skip_all, fields(path = %params.file_path))]
fn edit_file(store: &mut WorkspaceStore, params: &EditFileParams) -> Result<ToolOutput> {
    let outcome = store.edit_block(
        &params.file_path,
        &params.search_replace_block,
        params.replace_all,
    )?;
    Ok(edit_output(store.config(), outcome, FileAction::Edited))
}

#[tracing::instrument(
    name = "tool.client_replace_string_in_file",
    skip_all,
    fields(path = %params.file_path, case_insensitive = params.case_insensitive)
)]
fn replace_string(store: &mut WorkspaceStore, params: &ReplaceStringParams) -> Result<ToolOutput> {
    let outcome = store.replace_literal(
        &params.file_path,
        &params.old_string,
        &params.new_string,
        params.replace_all,
        params.case_insensitive,
    )?;
    Ok(edit_output(store.config(), outcome, FileAction::Modified))
}

#[tracing::instrument(name = "tool.delete_file", skip(store))]
fn delete_file(store: &mut WorkspaceStore, path: &str) -> Result<ToolOutput> {
    let record = store.delete(path)?;
    Ok(ToolOutput::Delete(DeleteFileOutput {
        path: record.path().to_string(),
        action: FileAction::Deleted,
    }))
}

#[tracing::instrument(name = "tool.delete_folder", skip(store))]
fn delete_folder(store: &mut WorkspaceStore, path: &str) -> Result<ToolOutput> {
    let deleted = store.delete_prefix(path)?;
    tracing::debug!(count = deleted.len(), "deleted folder contents");
    Ok(ToolOutput::DeleteFolder(DeleteFolderOutput {
        path: path.to_string(),
        files_deleted: deleted.len(),
        deleted,
    }))
}

#[tracing::instrument(name = "tool.list_files", skip(store))]
fn list_files(store: &WorkspaceStore, path: Option<&str>) -> ToolOutput {
    let files = store.list(path);
    ToolOutput::List(ListFilesOutput {
        count: files.len(),
        files,
    })
}

#[tracing::instrument(name = "tool.grep_search", skip_all, fields(pattern = %params.pattern))]
fn grep_search(store: &WorkspaceStore, params: &GrepSearchParams) -> Result<ToolOutput> {
    let outcome = store.grep(&params.pattern, params.path.as_deref(), params.case_sensitive)?;
    Ok(ToolOutput::Grep(GrepSearchOutput {
        truncated: outcome.total_matches > outcome.results.len(),
        results: outcome.results,
        total_matches: outcome.total_matches,
    }))
}

fn edit_output(config: &EngineConfig, outcome: EditOutcome, action: FileAction) -> ToolOutput {
    let (diff, diff_stats) = attach_diff(config, &outcome.previous, &outcome.applied.content);
    ToolOutput::Edit(EditOutput {
        file_path: outcome.path,
        action,
        match_strategy: outcome.applied.strategy,
        replacements: outcome.applied.replacements,
        diff,
        diff_stats,
    })
}

fn attach_diff(
    config: &EngineConfig,
    old: &str,
    new: &str,
) -> (Option<Vec<DiffLine>>, Option<DiffStats>) {
    if !config.include_diff {
        return (None, None);
    }
    match diff::bounded_diff(old, new, config.max_diff_cells) {
        Some(lines) => {
            let stats = DiffStats::from_lines(&lines);
            (Some(lines), Some(stats))
        }
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::Snapshot;
    use scrivener_types::MatchStrategy;
    use serde_json::json;

    fn executor(files: &[(&str, &str)]) -> (ToolExecutor, SessionKey) {
        let registry = Arc::new(SessionRegistry::default());
        let key = SessionKey::new("test-session");
        registry.seed(&key, Snapshot::from_files(files.iter().copied()));
        (ToolExecutor::new(registry), key)
    }

    #[test]
    fn test_write_then_update_attaches_diff() {
        let (exec, key) = executor(&[]);
        let out = exec
            .execute_json(&key, json!({"tool": "write_file", "input": {"path": "a.ts", "content": "x\n"}}));
        assert_eq!(out["success"], true);
        assert_eq!(out["action"], "created");
        assert_eq!(out["kind"], "typescript");
        assert!(out.get("diff").is_none());

        let out = exec
            .execute_json(&key, json!({"tool": "write_file", "input": {"path": "a.ts", "content": "y\n"}}));
        assert_eq!(out["action"], "updated");
        assert_eq!(out["diffStats"]["linesAdded"], 1);
        assert_eq!(out["diffStats"]["linesRemoved"], 1);
    }

    #[test]
    fn test_edit_reports_strategy() {
        let (exec, key) = executor(&[("src/app.ts", "function f() {\n  return 1;\n}\n")]);
        let call = ToolCall::Edit(EditFileParams {
            file_path: "app.ts".into(),
            search_replace_block: "<<<<<<< SEARCH\n    return 1;\n=======\n  return 2;\n>>>>>>> REPLACE"
                .into(),
            replace_all: false,
        });
        match exec.execute(&key, call).unwrap() {
            ToolOutput::Edit(out) => {
                assert_eq!(out.file_path, "src/app.ts");
                assert_eq!(out.action, FileAction::Edited);
                assert_eq!(out.match_strategy, MatchStrategy::WhitespaceFlexible);
            }
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[test]
    fn test_read_truncation_message() {
        let body: String = (1..=250).map(|n| format!("line {n}\n")).collect();
        let (exec, key) = executor(&[("big.txt", body.as_str())]);
        let out = exec.execute_json(&key, json!({"tool": "read_file", "input": {"path": "big.txt"}}));
        assert_eq!(out["truncated"], true);
        assert_eq!(out["endLine"], 200);
        assert!(out["message"].as_str().unwrap().contains("201-250"));

        let out = exec.execute_json(
            &key,
            json!({"tool": "read_file", "input": {"path": "big.txt", "lineRange": "201-250"}}),
        );
        assert!(out.get("truncated").is_none());
        assert_eq!(out["startLine"], 201);
        assert!(out["content"].as_str().unwrap().starts_with("line 201\n"));
    }

    #[test]
    fn test_explicit_lines_override_line_range() {
        let (exec, key) = executor(&[("a.txt", "1\n2\n3\n")]);
        let out = exec.execute_json(
            &key,
            json!({"tool": "read_file", "input": {"path": "a.txt", "startLine": 2, "endLine": 2, "lineRange": "1-3"}}),
        );
        assert_eq!(out["content"], "2\n");
    }

    #[test]
    fn test_failures_are_shaped() {
        let (exec, key) = executor(&[]);
        let out = exec.execute_json(&key, json!({"tool": "grep_search", "input": {"pattern": "("}}));
        assert_eq!(out["success"], false);
        assert_eq!(out["code"], "invalid_regex_pattern");

        let out = exec.execute_json(&key, json!({"tool": "no_such_tool"}));
        assert_eq!(out["success"], false);
        assert_eq!(out["code"], "invalid_params");
    }

    #[test]
    fn test_diff_disabled_by_config() {
        let config = EngineConfig {
            include_diff: false,
            ..EngineConfig::default()
        };
        let exec = ToolExecutor::new(Arc::new(SessionRegistry::from_config(config)));
        let key = SessionKey::new("s");
        exec.execute_json(&key, json!({"tool": "write_file", "input": {"path": "a", "content": "1"}}));
        let out = exec.execute_json(&key, json!({"tool": "write_file", "input": {"path": "a", "content": "2"}}));
        assert!(out.get("diff").is_none());
        assert!(out.get("diffStats").is_none());
    }

    #[test]
    fn test_oversized_diff_is_omitted_but_edit_applies() {
        let config = EngineConfig {
            max_diff_cells: 4,
            ..EngineConfig::default()
        };
        let registry = Arc::new(SessionRegistry::from_config(config));
        let key = SessionKey::new("s");
        registry.seed(&key, Snapshot::from_files([("app.ts", "a\nb\n")]));
        let exec = ToolExecutor::new(registry);

        let out = exec.execute_json(
            &key,
            json!({
                "tool": "edit_file",
                "input": {
                    "filePath": "app.ts",
                    "searchReplaceBlock": "<<<<<<< SEARCH\nb\n=======\nc\n>>>>>>> REPLACE"
                }
            }),
        );
        assert_eq!(out["success"], true);
        assert_eq!(out["action"], "edited");
        assert!(out.get("diff").is_none());
        assert!(out.get("diffStats").is_none());

        let read = exec.execute_json(&key, json!({"tool": "read_file", "input": {"path": "app.ts"}}));
        assert_eq!(read["content"], "a\nc\n");
    }
}
