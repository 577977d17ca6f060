//! Session registry with pluggable eviction.
//!
//! The registry is owned by the host, not a process-wide singleton. Each
//! session sits behind its own mutex, so two tool calls for the same key
//! serialize while calls for different keys run in parallel:
//!
//! ```text
//! SessionRegistry
//!   └── DashMap<SessionKey, SessionSlot>
//!         └── Arc<Mutex<WorkspaceSession>>   ← one lock per session
//! ```
//!
//! After every access the registry hands a usage table to its
//! [`EvictionPolicy`] and drops whatever the policy selects. Sessions that
//! are locked at sweep time are left out of the table.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use scrivener_types::SessionKey;

use crate::config::EngineConfig;
use crate::workspace::{MergeStats, Snapshot, WorkspaceSession};

/// Shared handle to one session.
pub type SharedSession = Arc<Mutex<WorkspaceSession>>;

/// What an eviction policy sees about one idle session.
#[derive(Debug, Clone)]
pub struct SessionUsage {
    pub key: SessionKey,
    pub last_access: Instant,
    pub file_count: usize,
    pub bytes: usize,
}

/// Decides which sessions to drop.
pub trait EvictionPolicy: Send + Sync {
    /// Policy name for logs.
    fn name(&self) -> &str;

    /// Keys to evict, given usage for every evictable session.
    fn select(&self, usage: &[SessionUsage], now: Instant) -> Vec<SessionKey>;
}

/// Never evicts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEviction;

impl EvictionPolicy for NoEviction {
    fn name(&self) -> &str {
        "none"
    }

    fn select(&self, _usage: &[SessionUsage], _now: Instant) -> Vec<SessionKey> {
        Vec::new()
    }
}

/// Keeps at most `max_sessions` evictable sessions, dropping the least
/// recently used.
#[derive(Debug, Clone, Copy)]
pub struct LruEviction {
    max_sessions: usize,
}

impl LruEviction {
    pub fn new(max_sessions: usize) -> Self {
        Self { max_sessions }
    }
}

impl EvictionPolicy for LruEviction {
    fn name(&self) -> &str {
        "lru"
    }

    fn select(&self, usage: &[SessionUsage], _now: Instant) -> Vec<SessionKey> {
        if usage.len() <= self.max_sessions {
            return Vec::new();
        }
        let mut by_age: Vec<&SessionUsage> = usage.iter().collect();
        by_age.sort_by_key(|u| u.last_access);
        by_age
            .into_iter()
            .take(usage.len() - self.max_sessions)
            .map(|u| u.key.clone())
            .collect()
    }
}

/// Drops sessions idle for longer than `idle`.
#[derive(Debug, Clone, Copy)]
pub struct TtlEviction {
    idle: Duration,
}

impl TtlEviction {
    pub fn new(idle: Duration) -> Self {
        Self { idle }
    }
}

impl EvictionPolicy for TtlEviction {
    fn name(&self) -> &str {
        "ttl"
    }

    fn select(&self, usage: &[SessionUsage], now: Instant) -> Vec<SessionKey> {
        usage
            .iter()
            .filter(|u| now.saturating_duration_since(u.last_access) > self.idle)
            .map(|u| u.key.clone())
            .collect()
    }
}

struct SessionSlot {
    session: SharedSession,
    last_access: Instant,
}

impl SessionSlot {
    /// Whether a caller outside the registry still holds this session.
    fn is_held(&self) -> bool {
        Arc::strong_count(&self.session) > 1
    }
}

/// All live sessions for one host.
pub struct SessionRegistry {
    sessions: DashMap<SessionKey, SessionSlot>,
    policy: Box<dyn EvictionPolicy>,
    config: Arc<EngineConfig>,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.len())
            .field("policy", &self.policy.name())
            .finish()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}

impl SessionRegistry {
    /// Create a registry with an explicit eviction policy.
    pub fn new(config: Arc<EngineConfig>, policy: Box<dyn EvictionPolicy>) -> Self {
        Self {
            sessions: DashMap::new(),
            policy,
            config,
        }
    }

    /// Create a registry using the policy named in `config.eviction`.
    pub fn from_config(config: EngineConfig) -> Self {
        let policy = config.eviction.build();
        Self::new(Arc::new(config), policy)
    }

    pub fn config(&self) -> &Arc<EngineConfig> {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.sessions.contains_key(key)
    }

    /// Get a session, creating an empty one on first use.
    pub fn session(&self, key: &SessionKey) -> SharedSession {
        let session = {
            let mut slot = self.sessions.entry(key.clone()).or_insert_with(|| {
                tracing::info!(session = %key.short(), "creating workspace session");
                SessionSlot {
                    session: Arc::new(Mutex::new(WorkspaceSession::new(self.config.clone()))),
                    last_access: Instant::now(),
                }
            });
            slot.last_access = Instant::now();
            slot.session.clone()
        };
        self.sweep(Some(key));
        session
    }

    /// Run `f` with the session locked.
    pub fn with_session<R>(&self, key: &SessionKey, f: impl FnOnce(&mut WorkspaceSession) -> R) -> R {
        let session = self.session(key);
        let mut guard = session.lock();
        f(&mut guard)
    }

    /// Merge a file snapshot into a session, creating it if needed.
    pub fn seed(&self, key: &SessionKey, snapshot: Snapshot) -> MergeStats {
        let stats = self.with_session(key, |session| session.merge(snapshot));
        tracing::info!(
            session = %key.short(),
            inserted = stats.inserted,
            replaced = stats.replaced,
            skipped = stats.skipped,
            "merged workspace snapshot"
        );
        stats
    }

    /// Drop a session. Returns its handle if it existed.
    pub fn remove(&self, key: &SessionKey) -> Option<SharedSession> {
        self.sessions.remove(key).map(|(_, slot)| slot.session)
    }

    /// Ask the policy for victims and drop them. `keep` is never evicted.
    ///
    /// A session whose handle is held outside the registry is in use, and is
    /// neither offered to the policy nor removed.
    pub fn sweep(&self, keep: Option<&SessionKey>) -> Vec<SessionKey> {
        let usage: Vec<SessionUsage> = self
            .sessions
            .iter()
            .filter(|entry| Some(entry.key()) != keep && !entry.value().is_held())
            .filter_map(|entry| {
                let session = entry.value().session.try_lock()?;
                Some(SessionUsage {
                    key: entry.key().clone(),
                    last_access: entry.value().last_access,
                    file_count: session.store.len(),
                    bytes: session.store.total_bytes(),
                })
            })
            .collect();

        let mut victims = self.policy.select(&usage, Instant::now());
        victims.retain(|key| Some(key) != keep);
        // Handles are cloned under the shard lock, so the held check and the
        // removal cannot interleave with a concurrent `session()`.
        victims.retain(|key| self.sessions.remove_if(key, |_, slot| !slot.is_held()).is_some());
        for key in &victims {
            tracing::info!(session = %key.short(), policy = self.policy.name(), "evicted workspace session");
        }
        victims
    }
}
