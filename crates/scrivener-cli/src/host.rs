//! JSON-lines request handling for `scrivener serve`.
//!
//! One request per line, one response per line:
//!
//! ```text
//! → {"session": "p1", "tool": "read_file", "input": {"path": "app.ts"}}
//! ← {"success": true, "path": "app.ts", "content": "...", ...}
//! ```
//!
//! `session` is optional and falls back to the key given on the command line.

use scrivener_kernel::{SessionKey, ToolExecutor, WorkspaceError};
use serde_json::Value;

/// Answer one request line. Blank lines yield `None`.
pub fn handle_line(exec: &ToolExecutor, default_key: &SessionKey, line: &str) -> Option<Value> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut request: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            return Some(
                WorkspaceError::InvalidParams(format!("request is not valid JSON: {e}")).to_response(),
            );
        }
    };

    let key = match request.as_object_mut().and_then(|body| body.remove("session")) {
        Some(Value::String(key)) => SessionKey::new(key),
        Some(other) => {
            return Some(
                WorkspaceError::InvalidParams(format!("session must be a string, got {other}"))
                    .to_response(),
            );
        }
        None => default_key.clone(),
    };

    Some(exec.execute_json(&key, request))
}
