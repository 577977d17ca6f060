//! A single file in a session's virtual workspace.

use scrivener_types::EntryKind;
use serde::Serialize;

use crate::path::basename;

/// One file (or directory marker) in a workspace.
///
/// `size` always equals `content.len()`; content only changes through
/// [`FileRecord::set_content`], which keeps the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    path: String,
    content: String,
    size: usize,
    kind: String,
    entry: EntryKind,
}

impl FileRecord {
    /// A text file. `path` should already be normalized.
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let content = content.into();
        Self {
            kind: detect_kind(&path).to_string(),
            size: content.len(),
            path,
            content,
            entry: EntryKind::File,
        }
    }

    /// A directory marker with no content.
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: String::new(),
            size: 0,
            kind: "directory".to_string(),
            entry: EntryKind::Directory,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Byte length of the content.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Display label derived from the extension (`"text"` when unknown).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn entry(&self) -> EntryKind {
        self.entry
    }

    pub fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    /// Replace the content, returning the previous text.
    pub fn set_content(&mut self, content: String) -> String {
        self.size = content.len();
        std::mem::replace(&mut self.content, content)
    }

    /// Consume the record, yielding `(path, content)`.
    pub fn into_parts(self) -> (String, String) {
        (self.path, self.content)
    }
}

/// Text after the last `.` of the final path segment.
fn extension(path: &str) -> Option<&str> {
    let name = basename(path);
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => Some(&name[idx + 1..]),
        _ => None,
    }
}

/// Display kind for a path, from its extension.
pub fn detect_kind(path: &str) -> &'static str {
    let Some(ext) = extension(path) else {
        return "text";
    };
    match ext.to_ascii_lowercase().as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        "jsx" => "javascriptreact",
        "go" => "go",
        "rb" => "ruby",
        "lua" => "lua",
        "sh" | "bash" => "bash",
        "zsh" => "zsh",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "java" => "java",
        "kt" => "kotlin",
        "swift" => "swift",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "json" => "json",
        "md" => "markdown",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "sql" => "sql",
        "vue" => "vue",
        "svelte" => "svelte",
        _ => "text",
    }
}
