//! Cache Store Module
//!
//! In-memory map from cache key to the latest upstream payload, with a fixed
//! expiration window.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::cache::{CacheCounters, CacheEntry, CacheKey, CacheStats};

// == Cache Store ==
/// Holds one entry per key for the lifetime of the process.
#[derive(Debug)]
pub struct CacheStore {
    /// Latest successful payload per key
    entries: HashMap<CacheKey, CacheEntry>,
    /// Performance counters, updated through `&self`
    counters: CacheCounters,
    /// How long an entry may be served after it was fetched
    expiration: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given expiration window.
    pub fn new(expiration: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::new(),
            expiration,
        }
    }

    /// Creates an empty store whose window is `ttl_secs` seconds.
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self::new(Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    // == Is Valid ==
    /// Returns true if an entry exists for `key` and is younger than the
    /// expiration window at `now`. Pure read.
    pub fn is_valid(&self, key: &CacheKey, now: DateTime<Utc>) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_valid_at(now, self.expiration))
    }

    // == Get ==
    /// Returns the stored entry for `key`, valid or not.
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Lookup ==
    /// Returns a copy of the entry for `key` if it is valid at `now`.
    ///
    /// Counts a hit or a miss. Needs only a shared borrow, so hits can be
    /// served under a read lock.
    pub fn lookup(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CacheEntry> {
        match self.entries.get(key) {
            Some(entry) if entry.is_valid_at(now, self.expiration) => {
                self.counters.record_hit();
                Some(entry.clone())
            }
            _ => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Replaces the entry for `key` with a freshly fetched payload.
    pub fn insert(&mut self, key: CacheKey, payload: Value, fetched_at: DateTime<Utc>) -> CacheEntry {
        let entry = CacheEntry::new(payload, fetched_at);
        self.entries.insert(key, entry.clone());
        self.counters.record_refresh();
        entry
    }

    /// Counts a failed upstream fetch. The entries are left as they are.
    pub fn record_upstream_failure(&self) {
        self.counters.record_upstream_failure();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.entries.len())
    }

    // == Cleanup Expired ==
    /// Removes every entry that is no longer valid at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let expiration = self.expiration;
        self.entries
            .retain(|_, entry| entry.is_valid_at(now, expiration));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
