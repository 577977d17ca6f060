//! Search/replace block parser.
//!
//! ```text
//! <<<<<<< SEARCH
//! old lines
//! =======
//! new lines
//! >>>>>>> REPLACE
//! ```
//!
//! Markers are whole lines, compared after trimming. Parsing is a line walk
//! rather than a regex so payloads may contain marker-looking text: a
//! `=======` inside the replace section is content, not a second divider.

use crate::error::{Result, WorkspaceError};

/// Opens the search section.
pub const SEARCH_START: &str = "<<<<<<< SEARCH";
/// Separates search from replace.
pub const DIVIDER: &str = "=======";
/// Closes the replace section; anything after it is ignored.
pub const REPLACE_END: &str = ">>>>>>> REPLACE";

/// A parsed `(search, replace)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchInstruction {
    pub search: String,
    pub replace: String,
}

impl PatchInstruction {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    None,
    Searching,
    Replacing,
}

/// Parse a search/replace block.
///
/// An empty search with a non-empty replace is valid (insertion at the start
/// of the file). Fails with [`WorkspaceError::InvalidPatchFormat`] only when
/// both sections are blank.
pub fn parse_block(block: &str) -> Result<PatchInstruction> {
    let mut state = ScanState::None;
    let mut search: Vec<&str> = Vec::new();
    let mut replace: Vec<&str> = Vec::new();

    for line in block.lines() {
        let marker = line.trim();
        match state {
            ScanState::None => {
                if marker == SEARCH_START {
                    state = ScanState::Searching;
                }
            }
            ScanState::Searching => {
                if marker == DIVIDER {
                    state = ScanState::Replacing;
                } else {
                    search.push(line);
                }
            }
            ScanState::Replacing => {
                if marker == REPLACE_END {
                    break;
                }
                replace.push(line);
            }
        }
    }

    let instruction = PatchInstruction::new(search.join("\n"), replace.join("\n"));
    if instruction.search.trim().is_empty() && instruction.replace.trim().is_empty() {
        return Err(WorkspaceError::InvalidPatchFormat);
    }
    Ok(instruction)
}
