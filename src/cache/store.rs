//! In-memory credential cache with TTL expiry

use crate::cache::key::CacheKey;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace, Level};

/// Default seconds a verified credential stays cached
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Upper bound on the interval between eviction sweeps
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Identity resolved by a successful GitLab verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIdentity {
    username: String,
    groups: Vec<String>,
}

impl CachedIdentity {
    pub fn new(username: impl Into<String>, groups: Vec<String>) -> Self {
        Self {
            username: username.into(),
            groups,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

#[derive(Debug)]
struct CacheEntry {
    identity: CachedIdentity,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

#[derive(Debug)]
struct Inner {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl Inner {
    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();

        entries.retain(|key, entry| {
            if !entry.is_expired(now) {
                return true;
            }
            if tracing::enabled!(Level::TRACE) {
                trace!(
                    "Expired cache key {} for user {} with groups {:?}",
                    key,
                    entry.identity.username,
                    entry.identity.groups
                );
            }
            false
        });

        before - entries.len()
    }
}

/// Credential cache shared between concurrent requests
///
/// Cloning is cheap and every clone sees the same entries. Entries are
/// inserted and removed whole, so a reader sees either a complete identity
/// or nothing.
#[derive(Debug, Clone)]
pub struct CredentialCache {
    inner: Arc<Inner>,
}

impl CredentialCache {
    /// Create a cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                entries: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a cache with a TTL in seconds
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        Self::new(Duration::from_secs(ttl_secs))
    }

    /// Configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Look up the identity cached for a credential pair
    ///
    /// Expired entries are never returned, whether or not a sweep has run.
    pub fn find(&self, username: &str, secret: &str) -> Option<CachedIdentity> {
        let key = CacheKey::derive(username, secret);
        let entries = self.inner.entries.read();
        let entry = entries.get(&key)?;

        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.identity.clone())
    }

    /// Cache an identity, replacing any previous entry and restarting its TTL
    pub fn store(&self, username: &str, secret: &str, identity: CachedIdentity) {
        let key = CacheKey::derive(username, secret);
        let entry = CacheEntry {
            identity,
            expires_at: Instant::now().checked_add(self.inner.ttl),
        };
        self.inner.entries.write().insert(key, entry);
    }

    /// Drop all expired entries, returning how many were evicted
    pub fn purge_expired(&self) -> usize {
        self.inner.purge_expired()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.inner
            .entries
            .read()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interval the background sweep runs at for this cache
    pub fn sweep_period(&self) -> Duration {
        self.inner.ttl.min(MAX_SWEEP_PERIOD)
    }

    /// Start the periodic eviction task on the current tokio runtime
    ///
    /// The task only holds a weak reference and stops once every clone of
    /// the cache has been dropped.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        let period = self.sweep_period();
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    debug!("Credential cache dropped, stopping sweeper");
                    break;
                };
                let evicted = inner.purge_expired();
                if evicted > 0 {
                    debug!("Evicted {} expired credential(s)", evicted);
                }
            }
        })
    }

    #[cfg(test)]
    fn stored_len(&self) -> usize {
        self.inner.entries.read().len()
    }
}
