//! Shared types for the scrivener workspace engine.
//!
//! This crate is a pure leaf: session keys, file action tags, and the diff
//! records that travel back to whoever renders a tool result. The kernel crate
//! builds on these; display layers can depend on this crate alone.
//!
//! # Key Types
//!
//! |------------------|----------------------------------------------|
//! | Type             | Purpose                                      |
//! |------------------|----------------------------------------------|
//! | [`SessionKey`]   | Which workspace session a tool call targets  |
//! | [`EntryKind`]    | File or directory record                     |
//! | [`FileAction`]   | What a mutating tool did to its target       |
//! | [`MatchStrategy`]| How an edit located its search text          |
//! | [`DiffLine`]     | One numbered line of a before/after diff     |
//! |------------------|----------------------------------------------|

pub mod diff;
pub mod file;
pub mod ids;

pub use diff::{DiffKind, DiffLine, DiffStats};
pub use file::{EntryKind, FileAction, MatchStrategy};
pub use ids::SessionKey;
