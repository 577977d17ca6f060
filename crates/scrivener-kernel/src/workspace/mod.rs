//! Virtual workspace: file records, the per-session store, and snapshots.
//!
//! A [`WorkspaceSession`] is what one logical project looks like to the
//! engine: a [`WorkspaceStore`] keyed by normalized path, plus an optional
//! display-only file tree. Sessions are seeded from a [`Snapshot`] handed over
//! by the durable project store and give their final content back through
//! [`WorkspaceSession::export`].

mod range;
mod record;
mod session;
mod store;

pub use range::LineRange;
pub use record::{FileRecord, detect_kind};
pub use session::{MergeStats, Snapshot, SnapshotEntry, WorkspaceSession};
pub use store::{EditOutcome, GrepHit, GrepOutcome, ListEntry, ReadOutcome, WorkspaceStore, WriteOutcome};
