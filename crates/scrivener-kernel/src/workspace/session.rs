//! Workspace sessions and snapshot merging.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::path;

use super::record::FileRecord;
use super::store::WorkspaceStore;

/// One file in an incoming snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub path: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_directory: bool,
}

impl SnapshotEntry {
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            is_directory: false,
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: String::new(),
            is_directory: true,
        }
    }
}

/// Initial (or refreshed) file set for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub files: Vec<SnapshotEntry>,
    /// Display hint only; replaces the session's tree when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_tree: Option<Vec<String>>,
}

impl Snapshot {
    pub fn from_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        Self {
            files: files
                .into_iter()
                .map(|(path, content)| SnapshotEntry::file(path, content))
                .collect(),
            file_tree: None,
        }
    }
}

/// Counts from merging a snapshot into a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub replaced: usize,
    pub skipped: usize,
}

/// One logical project's in-memory state.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSession {
    pub store: WorkspaceStore,
    file_tree: Vec<String>,
}

impl WorkspaceSession {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            store: WorkspaceStore::new(config),
            file_tree: Vec::new(),
        }
    }

    /// Display-only ordered path list.
    pub fn file_tree(&self) -> &[String] {
        &self.file_tree
    }

    /// Merge a snapshot into the store.
    ///
    /// Incoming paths overwrite records with the same normalized path.
    /// Records absent from the snapshot are kept. Entries whose path
    /// normalizes to nothing are skipped.
    pub fn merge(&mut self, snapshot: Snapshot) -> MergeStats {
        let mut stats = MergeStats::default();
        for entry in snapshot.files {
            let key = path::normalize(&entry.path);
            if key.is_empty() {
                tracing::warn!(path = %entry.path, "skipping snapshot entry with empty path");
                stats.skipped += 1;
                continue;
            }
            let record = if entry.is_directory {
                FileRecord::directory(key)
            } else {
                FileRecord::file(key, entry.content)
            };
            match self.store.insert(record) {
                Some(_) => stats.replaced += 1,
                None => stats.inserted += 1,
            }
        }
        if let Some(tree) = snapshot.file_tree {
            self.file_tree = tree;
        }
        stats
    }

    /// Current file contents in path order, for syncing back to durable storage.
    pub fn export(&self) -> Vec<SnapshotEntry> {
        self.store
            .records()
            .filter(|record| !record.is_dir())
            .map(|record| SnapshotEntry::file(record.path(), record.content()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut session = WorkspaceSession::default();
        let stats = session.merge(Snapshot::from_files([("a.ts", "1"), ("b.ts", "1")]));
        assert_eq!(stats.inserted, 2);

        // Second snapshot omits b.ts: it must survive.
        let stats = session.merge(Snapshot::from_files([("./a.ts", "2"), ("c.ts", "2")]));
        assert_eq!(stats, MergeStats { inserted: 1, replaced: 1, skipped: 0 });

        let exported = session.export();
        let pairs: Vec<(&str, &str)> = exported
            .iter()
            .map(|e| (e.path.as_str(), e.content.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a.ts", "2"), ("b.ts", "1"), ("c.ts", "2")]);
    }

    #[test]
    fn test_merge_skips_empty_paths_and_keeps_directories_out_of_export() {
        let mut session = WorkspaceSession::default();
        let snapshot = Snapshot {
            files: vec![
                SnapshotEntry::file("/", "lost"),
                SnapshotEntry::directory("src"),
                SnapshotEntry::file("src/main.rs", "fn main() {}"),
            ],
            file_tree: Some(vec!["src".into(), "src/main.rs".into()]),
        };
        let stats = session.merge(snapshot);
        assert_eq!(stats.skipped, 1);
        assert_eq!(session.store.len(), 2);
        assert_eq!(session.export().len(), 1);
        assert_eq!(session.file_tree(), ["src", "src/main.rs"]);
    }

    #[test]
    fn test_file_tree_kept_when_snapshot_has_none() {
        let mut session = WorkspaceSession::default();
        session.merge(Snapshot {
            files: Vec::new(),
            file_tree: Some(vec!["x".into()]),
        });
        session.merge(Snapshot::from_files([("y", "")]));
        assert_eq!(session.file_tree(), ["x"]);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = r#"{"files":[{"path":"a.ts","content":"x"},{"path":"src","isDirectory":true}],"fileTree":["a.ts"]}"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.files[1], SnapshotEntry::directory("src"));
        assert_eq!(snapshot.file_tree.as_deref(), Some(&["a.ts".to_string()][..]));
    }
}
