//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file)
//! yields the stock limits:
//!
//! ```toml
//! read_line_limit = 200
//! grep_max_results = 50
//! include_diff = true
//!
//! [eviction]
//! policy = "lru"       # "none" (default), "lru", or "ttl"
//! max_sessions = 64    # lru only
//! # idle_secs = 3600   # ttl only
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::session::{EvictionPolicy, LruEviction, NoEviction, TtlEviction};

/// Tunables for workspace operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lines returned by an unranged read before truncating.
    pub read_line_limit: usize,
    /// Grep hits returned per call (the total count is still reported).
    pub grep_max_results: usize,
    /// Characters kept from each grep hit line.
    pub grep_line_max_chars: usize,
    /// Characters of failed search text echoed back in errors.
    pub search_snippet_chars: usize,
    /// "Did you mean" candidates on a path miss.
    pub suggestion_limit: usize,
    /// Attach line diffs to mutating tool results.
    pub include_diff: bool,
    /// Largest LCS table (cells) computed for a result diff.
    pub max_diff_cells: usize,
    /// Session eviction policy for the registry.
    pub eviction: EvictionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            read_line_limit: 200,
            grep_max_results: 50,
            grep_line_max_chars: 200,
            search_snippet_chars: 100,
            suggestion_limit: 3,
            include_diff: true,
            max_diff_cells: 4_000_000,
            eviction: EvictionConfig::None,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("invalid engine config")
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("in {}", path.display()))
    }
}

/// Which eviction policy the session registry runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum EvictionConfig {
    /// Sessions live until the host removes them.
    #[default]
    None,
    /// Keep at most `max_sessions`, dropping the least recently used.
    Lru { max_sessions: usize },
    /// Drop sessions idle for longer than `idle_secs`.
    Ttl { idle_secs: u64 },
}

impl EvictionConfig {
    /// Build the policy object this config describes.
    pub fn build(&self) -> Box<dyn EvictionPolicy> {
        match *self {
            EvictionConfig::None => Box::new(NoEviction),
            EvictionConfig::Lru { max_sessions } => Box::new(LruEviction::new(max_sessions)),
            EvictionConfig::Ttl { idle_secs } => {
                Box::new(TtlEviction::new(Duration::from_secs(idle_secs)))
            }
        }
    }
}
