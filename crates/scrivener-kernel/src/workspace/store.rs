//! Session-scoped file store.

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::RegexBuilder;
use scrivener_types::{EntryKind, FileAction};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{Result, WorkspaceError};
use crate::patch::{self, Applied};
use crate::path::{self, Resolution};

use super::range::LineRange;
use super::record::FileRecord;

/// Result of a write.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub path: String,
    pub action: FileAction,
    /// Content before the write; empty for new files.
    pub previous: String,
}

/// Result of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub path: String,
    pub content: String,
    pub total_lines: usize,
    /// 1-indexed first line returned (0 for an empty file).
    pub start_line: usize,
    /// 1-indexed last line returned (0 for an empty file).
    pub end_line: usize,
    pub truncated: bool,
}

/// Result of an in-place edit.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub path: String,
    pub applied: Applied,
    pub previous: String,
}

/// One `list_files` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub size: usize,
}

/// One grep hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrepHit {
    pub file_path: String,
    pub line_number: usize,
    pub line_content: String,
}

/// Grep hits, capped, plus the uncapped match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrepOutcome {
    pub results: Vec<GrepHit>,
    pub total_matches: usize,
}

/// Mapping from normalized path to file record for one session.
///
/// Every operation touches one record (or one prefix) and is all-or-nothing:
/// patches are computed on a copy of the content and committed only when
/// they succeed.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    files: BTreeMap<String, FileRecord>,
    config: Arc<EngineConfig>,
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl WorkspaceStore {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            files: BTreeMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of all content sizes.
    pub fn total_bytes(&self) -> usize {
        self.files.values().map(FileRecord::size).sum()
    }

    /// Records in path order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.values()
    }

    /// Look up a record by its stored key (no fuzzy resolution).
    pub fn get(&self, key: &str) -> Option<&FileRecord> {
        self.files.get(key)
    }

    /// Insert or overwrite a record under its normalized path.
    ///
    /// Returns the record it replaced, if any.
    pub fn insert(&mut self, record: FileRecord) -> Option<FileRecord> {
        let key = path::normalize(record.path());
        let record = if key == record.path() {
            record
        } else if record.is_dir() {
            FileRecord::directory(key.clone())
        } else {
            let (_, content) = record.into_parts();
            FileRecord::file(key.clone(), content)
        };
        self.files.insert(key, record)
    }

    /// Resolve a caller-supplied path to a stored key.
    pub fn resolve(&self, input: &str) -> Result<Resolution<'_>> {
        let hit = path::resolve(&self.files, input).ok_or_else(|| {
            WorkspaceError::path_not_found(
                input,
                path::suggest(&self.files, input, self.config.suggestion_limit),
            )
        })?;
        if hit.via.is_fuzzy() {
            tracing::debug!(input, resolved = hit.key, via = ?hit.via, "resolved path fuzzily");
        }
        Ok(hit)
    }

    /// Resolve to an owned key of a non-directory record.
    fn resolve_file(&self, input: &str) -> Result<String> {
        let hit = self.resolve(input)?;
        let key = hit.key.to_string();
        if self.files.get(&key).is_some_and(FileRecord::is_dir) {
            return Err(WorkspaceError::IsADirectory(key));
        }
        Ok(key)
    }

    /// Create or overwrite a file.
    ///
    /// An existing record found by resolution is updated in place under its
    /// stored key; otherwise a new record is created at the normalized path.
    pub fn write(&mut self, input: &str, content: &str) -> Result<WriteOutcome> {
        let existing = path::resolve(&self.files, input).map(|hit| hit.key.to_string());
        match existing {
            Some(key) => {
                let record = self
                    .files
                    .get_mut(&key)
                    .ok_or_else(|| WorkspaceError::path_not_found(input, Vec::new()))?;
                if record.is_dir() {
                    return Err(WorkspaceError::IsADirectory(key));
                }
                let previous = record.set_content(content.to_string());
                Ok(WriteOutcome {
                    path: key,
                    action: FileAction::Updated,
                    previous,
                })
            }
            None => {
                let key = path::normalize(input);
                if key.is_empty() || key == "." {
                    return Err(WorkspaceError::InvalidPath(input.to_string()));
                }
                self.files
                    .insert(key.clone(), FileRecord::file(key.clone(), content));
                Ok(WriteOutcome {
                    path: key,
                    action: FileAction::Created,
                    previous: String::new(),
                })
            }
        }
    }

    /// Read a file, optionally restricted to a line range.
    ///
    /// Without a range, files longer than `read_line_limit` are cut to the
    /// first `read_line_limit` lines and flagged `truncated`.
    pub fn read(&self, input: &str, range: LineRange) -> Result<ReadOutcome> {
        let key = self.resolve_file(input)?;
        let content = self
            .files
            .get(&key)
            .map(FileRecord::content)
            .unwrap_or_default();
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let total = lines.len();

        let (start, end, truncated) = if range.is_set() {
            let (start, end) = range.clamp(total)?;
            (start, end, false)
        } else if total > self.config.read_line_limit {
            (0, self.config.read_line_limit, true)
        } else {
            (0, total, false)
        };

        let text = if start == 0 && end == total {
            content.to_string()
        } else {
            lines[start..end].concat()
        };

        Ok(ReadOutcome {
            path: key,
            content: text,
            total_lines: total,
            start_line: if end > start { start + 1 } else { 0 },
            end_line: end,
            truncated,
        })
    }

    /// Apply a search/replace block to a file.
    pub fn edit_block(&mut self, input: &str, block: &str, replace_all: bool) -> Result<EditOutcome> {
        let instruction = patch::parse_block(block)?;
        let key = self.resolve_file(input)?;
        let snippet = self.config.search_snippet_chars;
        self.commit(key, |path, content| {
            patch::apply_block_patch(path, content, &instruction, replace_all, snippet)
        })
    }

    /// Replace literal text in a file.
    pub fn replace_literal(
        &mut self,
        input: &str,
        old: &str,
        new: &str,
        replace_all: bool,
        case_insensitive: bool,
    ) -> Result<EditOutcome> {
        let key = self.resolve_file(input)?;
        let snippet = self.config.search_snippet_chars;
        self.commit(key, |path, content| {
            patch::apply_literal_replace(path, content, old, new, replace_all, case_insensitive, snippet)
        })
    }

    /// Run a patch against a record's content and store the result on success.
    fn commit(
        &mut self,
        key: String,
        apply: impl FnOnce(&str, &str) -> Result<Applied>,
    ) -> Result<EditOutcome> {
        let record = self
            .files
            .get_mut(&key)
            .ok_or_else(|| WorkspaceError::path_not_found(key.clone(), Vec::new()))?;
        let applied = apply(&key, record.content())?;
        let previous = record.set_content(applied.content.clone());
        Ok(EditOutcome {
            path: key,
            applied,
            previous,
        })
    }

    /// Remove one record.
    pub fn delete(&mut self, input: &str) -> Result<FileRecord> {
        let key = self.resolve(input)?.key.to_string();
        self.files
            .remove(&key)
            .ok_or_else(|| WorkspaceError::path_not_found(input, Vec::new()))
    }

    /// Remove every record under a directory prefix.
    ///
    /// The prefix gets a trailing `/` so `src` never matches `srcgen/`. A
    /// directory marker at the bare prefix is dropped too but not counted.
    /// Returns the removed keys in path order.
    pub fn delete_prefix(&mut self, prefix: &str) -> Result<Vec<String>> {
        let bare = path::normalize(prefix);
        if bare.is_empty() {
            return Err(WorkspaceError::InvalidPath(prefix.to_string()));
        }
        let dir = format!("{bare}/");

        let doomed: Vec<String> = self
            .files
            .keys()
            .filter(|key| key.starts_with(&dir))
            .cloned()
            .collect();
        if doomed.is_empty() {
            return Err(WorkspaceError::EmptyPrefix(bare));
        }

        for key in &doomed {
            self.files.remove(key);
        }
        if self.files.get(&bare).is_some_and(FileRecord::is_dir) {
            self.files.remove(&bare);
        }
        Ok(doomed)
    }

    /// List records whose key starts with `prefix` (all when `None`).
    pub fn list(&self, prefix: Option<&str>) -> Vec<ListEntry> {
        let prefix = prefix.map(path::normalize).unwrap_or_default();
        self.files
            .values()
            .filter(|record| record.path().starts_with(&prefix))
            .map(|record| ListEntry {
                path: record.path().to_string(),
                kind: record.entry(),
                size: record.size(),
            })
            .collect()
    }

    /// Regex search across files, one line at a time.
    pub fn grep(&self, pattern: &str, prefix: Option<&str>, case_sensitive: bool) -> Result<GrepOutcome> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| WorkspaceError::InvalidRegexPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        let prefix = prefix.map(path::normalize).unwrap_or_default();
        let max_results = self.config.grep_max_results;
        let max_chars = self.config.grep_line_max_chars;

        let mut results = Vec::new();
        let mut total_matches = 0;
        for record in self
            .files
            .values()
            .filter(|r| !r.is_dir() && r.path().starts_with(&prefix))
        {
            for (idx, line) in record.content().lines().enumerate() {
                if !regex.is_match(line) {
                    continue;
                }
                total_matches += 1;
                if results.len() < max_results {
                    results.push(GrepHit {
                        file_path: record.path().to_string(),
                        line_number: idx + 1,
                        line_content: line.trim().chars().take(max_chars).collect(),
                    });
                }
            }
        }

        Ok(GrepOutcome {
            results,
            total_matches,
        })
    }
}
