//! Inclusive 1-indexed line ranges for reads.

use crate::error::{Result, WorkspaceError};

/// A requested line window. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineRange {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl LineRange {
    pub fn new(start: Option<u32>, end: Option<u32>) -> Self {
        Self { start, end }
    }

    /// Whether any bound was supplied.
    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Parse `"N-M"` or a single line `"N"`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let invalid = || WorkspaceError::InvalidParams(format!("invalid lineRange {raw:?}, expected \"N-M\""));
        let parse_bound = |s: &str| s.trim().parse::<u32>().map_err(|_| invalid());

        match raw.split_once('-') {
            Some((start, end)) => Ok(Self::new(Some(parse_bound(start)?), Some(parse_bound(end)?))),
            None => {
                let line = parse_bound(raw)?;
                Ok(Self::new(Some(line), Some(line)))
            }
        }
    }

    /// Clamp against a file of `total` lines, yielding 0-indexed `[start, end)`.
    ///
    /// A missing or zero start means line 1; a missing or overlong end means
    /// the last line.
    pub fn clamp(&self, total: usize) -> Result<(usize, usize)> {
        let start = self.start.unwrap_or(1).max(1) as usize;
        let end = self.end.map(|e| e as usize).unwrap_or(total).min(total);

        if total == 0 {
            return Ok((0, 0));
        }
        if start > total {
            return Err(WorkspaceError::line_out_of_range(start as u32, total as u32));
        }
        if end < start {
            return Err(WorkspaceError::InvalidParams(format!(
                "endLine ({end}) must be >= startLine ({start})"
            )));
        }
        Ok((start - 1, end))
    }
}
