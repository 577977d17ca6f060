//! Session identifiers.
//!
//! Session keys are issued by whoever owns the session lifecycle (a chat
//! backend, an editor host). The engine treats them as opaque strings; the
//! only thing it ever does with one is hash it. [`SessionKey::generate`] mints
//! a UUIDv7 for hosts that don't have their own identifier scheme.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque, externally issued session identifier.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Wrap an existing identifier.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Mint a fresh time-ordered key (UUIDv7, simple hex form).
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().as_simple().to_string())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for log lines only. Never use for lookup.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl From<&str> for SessionKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SessionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKey({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = SessionKey::generate();
        let b = SessionKey::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn test_short_handles_short_keys() {
        assert_eq!(SessionKey::new("abc").short(), "abc");
        assert_eq!(SessionKey::new("0123456789").short(), "01234567");
    }

    #[test]
    fn test_serde_is_transparent() {
        let key = SessionKey::new("chat-42");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"chat-42\"");
        let back: SessionKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
