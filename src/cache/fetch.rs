//! Fetch-or-Serve Flow
//!
//! Serves a key from the cache while it is valid and goes upstream otherwise.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheKey, CacheStore};
use crate::clock::Clock;
use crate::error::Result;

/// Cache store shared between handlers and background tasks.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store for sharing.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}

// == Fetch Or Serve ==
/// Returns the entry for `key`, calling `fetch` only when the cached one is
/// missing or stale.
///
/// On success the new payload is stored with the time the fetch completed.
/// On failure the cache is left untouched and the error is returned as is.
/// Lookups take only the read lock; the write lock is taken to store a fresh
/// payload. No lock is held while `fetch` runs, so concurrent misses for the
/// same key each go upstream and the last write wins.
pub async fn fetch_or_serve<F, Fut>(
    cache: &SharedCache,
    clock: &dyn Clock,
    key: CacheKey,
    fetch: F,
) -> Result<CacheEntry>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let (cached, expiration) = {
        let store = cache.read().await;
        (store.lookup(&key, clock.now()), store.expiration())
    };

    if let Some(entry) = cached {
        match entry.expires_at(expiration) {
            Some(expires_at) => debug!("Cache hit for {} (expires at {})", key, expires_at),
            None => debug!("Cache hit for {} (never expires)", key),
        }
        return Ok(entry);
    }

    debug!("Cache miss for {}, fetching from upstream", key);
    match fetch().await {
        Ok(payload) => {
            let fetched_at = clock.now();
            let mut store = cache.write().await;
            Ok(store.insert(key, payload, fetched_at))
        }
        Err(err) => {
            if err.is_not_found() {
                debug!("Upstream has no data for {}: {}", key, err);
            } else {
                warn!("Upstream fetch for {} failed: {}", key, err);
            }
            cache.read().await.record_upstream_failure();
            Err(err)
        }
    }
}
