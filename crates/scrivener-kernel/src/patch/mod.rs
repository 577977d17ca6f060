//! Search/replace patching.
//!
//! Two independent edit paths:
//!
//! - **Block patches** ([`parse_block`] + [`apply_block_patch`]): the model
//!   sends a delimited `SEARCH`/`REPLACE` block. The applier tries a verbatim
//!   substring match, then a line window compared after trimming.
//! - **Literal replacement** ([`apply_literal_replace`]): plain old/new
//!   strings, optionally case-folded.
//!
//! Both operate on owned content and return the new text; callers commit it
//! to the record only on success, so a failed patch never leaves a partial
//! edit behind.

mod apply;
mod block;

pub use apply::{Applied, apply_block_patch, apply_literal_replace, find_case_insensitive};
pub use block::{DIVIDER, PatchInstruction, REPLACE_END, SEARCH_START, parse_block};
