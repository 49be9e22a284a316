//! Process-local keyed TTL store.
//!
//! `TtlStore` holds `(value, stored_at)` pairs keyed by `CacheKey`, with the TTL of
//! every entry decided by its category. The store is an owned value: it is built
//! once at startup and handed to its consumers behind an `Arc`, so tests can create
//! a fresh store each and nothing leaks between them.
//!
//! All operations are synchronous. The map sits behind a single mutex that is held
//! only for the duration of one lookup or mutation and never across an `.await`.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::{collections::HashMap, time::Duration};

use super::{
    category::{Category, TtlPolicy},
    entry::{CacheEntry, CacheKey},
};

/// How `TtlStore::get` treats an entry older than its category TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Expired entries are removed and reported as absent.
    Fresh,
    /// Expired entries are returned with `expired` set and kept, so a caller can
    /// hold on to them as a fallback while it refreshes.
    AllowStale,
}

/// Value returned from a store lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue<V> {
    pub value: V,
    pub stored_at: DateTime<Utc>,
    /// True if the entry was older than its category TTL when read.
    pub expired: bool,
}

/// Anything the cache sweeper can periodically purge.
pub trait Sweep: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Removes every entry past its TTL plus the store's stale grace, returning
    /// how many were removed.
    fn sweep(&self) -> usize;
}

pub struct TtlStore<V> {
    name: &'static str,
    policy: TtlPolicy,
    /// How long past its TTL an entry survives sweeps, bounding how old a stale
    /// fallback can get.
    stale_grace: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
}

impl<V: Clone> TtlStore<V> {
    pub fn new(name: &'static str, policy: TtlPolicy) -> Self {
        Self {
            name,
            policy,
            stale_grace: Duration::ZERO,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Keeps expired entries through sweeps until they are `grace` past their TTL.
    ///
    /// Reads are unaffected: `ReadMode::Fresh` still treats such entries as
    /// expired. A store without grace sweeps entries as soon as they expire.
    pub fn with_stale_grace(mut self, grace: Duration) -> Self {
        self.stale_grace = grace;
        self
    }

    pub fn policy(&self) -> &TtlPolicy {
        &self.policy
    }

    pub fn stale_grace(&self) -> Duration {
        self.stale_grace
    }

    /// Looks up `key`.
    ///
    /// In `ReadMode::Fresh` an entry older than its TTL is deleted and `None` is
    /// returned. In `ReadMode::AllowStale` it is returned with `expired` set and
    /// left in place.
    pub fn get(&self, key: &CacheKey, mode: ReadMode) -> Option<CachedValue<V>> {
        let ttl = self.policy.ttl(key.category);
        let mut entries = self.entries.lock();

        let entry = entries.get(key)?;
        let expired = entry.age() > ttl;

        if expired && mode == ReadMode::Fresh {
            entries.remove(key);
            tracing::trace!("{} store: evicted expired entry {}", self.name, key);
            return None;
        }

        Some(CachedValue {
            value: entry.value.clone(),
            stored_at: entry.stored_at,
            expired,
        })
    }

    /// Unconditionally writes `value`, replacing any previous entry and resetting
    /// its age.
    pub fn set(&self, key: CacheKey, value: V) {
        self.entries.lock().insert(key, CacheEntry::new(value));
    }

    /// Removes a single entry. Returns whether an entry was present.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    /// Removes every entry of `category` whose scope starts with `scope_prefix`.
    pub fn invalidate_prefix(&self, category: Category, scope_prefix: &str) -> usize {
        self.remove_where(|key, _| key.category == category && key.scope.starts_with(scope_prefix))
    }

    /// Removes the entries of every category for exactly `scope`.
    pub fn invalidate_scope(&self, scope: &str) -> usize {
        self.remove_where(|key, _| key.scope == scope)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn remove_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&CacheKey, &CacheEntry<V>) -> bool,
    {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, entry| !predicate(key, entry));
        before - entries.len()
    }
}

impl<V: Clone + Send> Sweep for TtlStore<V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn sweep(&self) -> usize {
        let policy = self.policy;
        let grace = self.stale_grace;
        self.remove_where(|key, entry| entry.age() > policy.ttl(key.category) + grace)
    }
}
