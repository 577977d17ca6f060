//! Path canonicalization and fuzzy resolution.
//!
//! Models guess at paths. They prepend `./`, drop directories, or double a
//! slash. [`normalize`] gives every path one canonical spelling, and
//! [`resolve`] walks a fixed ladder of strategies to find the single stored
//! record a guess refers to:
//!
//! ```text
//! exact key → normalized key → normalized stored key → unique basename → unique suffix
//! ```
//!
//! Ambiguity is a miss. When two records share a basename the resolver
//! refuses to pick; [`suggest`] lists them so the caller can retry with a
//! full path.

mod normalize;
mod resolve;

pub use normalize::{basename, normalize};
pub use resolve::{Resolution, ResolveStrategy, resolve, suggest};
