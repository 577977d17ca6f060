//! Scrivener kernel: an in-memory project workspace that AI agents edit
//! through tool calls.
//!
//! The host owns a [`SessionRegistry`]; a [`ToolExecutor`] runs
//! [`ToolCall`]s against it. Nothing here touches a real filesystem. Sessions
//! are seeded from a [`Snapshot`] and their final files read back with
//! [`WorkspaceSession::export`].
//!
//! # Layers
//!
//! | Module | Role |
//! |--------|------|
//! | [`path`] | Canonical paths and fuzzy resolution |
//! | [`patch`] | SEARCH/REPLACE blocks and literal replacement |
//! | [`diff`] | LCS line diffs |
//! | [`workspace`] | File records, the per-session store, snapshots |
//! | [`session`] | Registry of sessions with pluggable eviction |
//! | [`tools`] | Closed tool-call enum, dispatch, JSON responses |

pub mod config;
pub mod diff;
pub mod error;
pub mod patch;
pub mod path;
pub mod session;
pub mod tools;
pub mod workspace;

pub use config::{EngineConfig, EvictionConfig};
pub use error::{Result, WorkspaceError};
pub use session::{
    EvictionPolicy, LruEviction, NoEviction, SessionRegistry, SessionUsage, SharedSession,
    TtlEviction,
};
pub use tools::{ToolCall, ToolExecutor, ToolOutput, ToolSpec};
pub use workspace::{FileRecord, Snapshot, SnapshotEntry, WorkspaceSession, WorkspaceStore};

pub use scrivener_types::SessionKey;
