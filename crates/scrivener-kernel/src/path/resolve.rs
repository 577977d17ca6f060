//! Fuzzy path resolution against a session's stored records.

use std::collections::BTreeMap;

use crate::workspace::FileRecord;

use super::normalize::{basename, normalize};

/// Which rung of the resolution ladder produced a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// Input was already a stored key.
    Exact,
    /// Normalized input is a stored key.
    Normalized,
    /// A stored key normalizes to the normalized input.
    NormalizedStored,
    /// Exactly one file shares the input's basename.
    Basename,
    /// Exactly one file ends with the normalized input.
    Suffix,
}

impl ResolveStrategy {
    /// Whether the caller's path differed from the key it resolved to.
    pub fn is_fuzzy(&self) -> bool {
        matches!(self, Self::Basename | Self::Suffix)
    }
}

/// A successful resolution: the stored key and how it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub key: &'a str,
    pub via: ResolveStrategy,
}

/// Resolve an agent-supplied path to a stored key.
///
/// Resolution order (first unique hit wins):
/// 1. Exact key match
/// 2. Normalized key match
/// 3. Stored key whose normalized form equals the normalized input
/// 4. Unique basename match among files
/// 5. Unique suffix match among files
///
/// Multiple basename or suffix candidates fall through to `None`.
pub fn resolve<'a>(files: &'a BTreeMap<String, FileRecord>, input: &str) -> Option<Resolution<'a>> {
    if let Some((key, _)) = files.get_key_value(input) {
        return Some(Resolution {
            key: key.as_str(),
            via: ResolveStrategy::Exact,
        });
    }

    let normalized = normalize(input);
    if normalized.is_empty() {
        return None;
    }

    if let Some((key, _)) = files.get_key_value(normalized.as_str()) {
        return Some(Resolution {
            key: key.as_str(),
            via: ResolveStrategy::Normalized,
        });
    }

    if let Some(key) = files.keys().find(|key| normalize(key) == normalized) {
        return Some(Resolution {
            key: key.as_str(),
            via: ResolveStrategy::NormalizedStored,
        });
    }

    let base = basename(&normalized);
    if !base.is_empty() {
        let mut by_basename = files
            .iter()
            .filter(|(key, record)| !record.is_dir() && basename(key) == base)
            .map(|(key, _)| key.as_str());
        if let (Some(only), None) = (by_basename.next(), by_basename.next()) {
            return Some(Resolution {
                key: only,
                via: ResolveStrategy::Basename,
            });
        }
    }

    let suffix = format!("/{normalized}");
    let mut by_suffix = files
        .iter()
        .filter(|(key, record)| {
            !record.is_dir() && (key.as_str() == normalized || key.ends_with(&suffix))
        })
        .map(|(key, _)| key.as_str());
    if let (Some(only), None) = (by_suffix.next(), by_suffix.next()) {
        return Some(Resolution {
            key: only,
            via: ResolveStrategy::Suffix,
        });
    }

    None
}

/// "Did you mean" candidates for a path that failed to resolve.
///
/// A file is a candidate when it shares the input's basename, or when its
/// path and the normalized input contain one another. Advisory only.
pub fn suggest(files: &BTreeMap<String, FileRecord>, input: &str, limit: usize) -> Vec<String> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return Vec::new();
    }
    let base = basename(&normalized);

    files
        .iter()
        .filter(|(_, record)| !record.is_dir())
        .map(|(key, _)| key)
        .filter(|key| {
            (!base.is_empty() && basename(key) == base)
                || key.contains(normalized.as_str())
                || normalized.contains(key.as_str())
        })
        .take(limit)
        .cloned()
        .collect()
}
