//! Expired Entry Purge Task
//!
//! Background task that periodically drops cache entries whose window has
//! passed. Valid entries are never touched.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::clock::Clock;

/// Spawns a background task that periodically removes expired cache entries.
///
/// The task sleeps for `cleanup_interval_secs` (at least one second) between
/// runs and takes the write lock only for the purge itself.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: SharedCache,
    clock: Arc<dyn Clock>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval_secs = cleanup_interval_secs.max(1);
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache purge task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired(clock.now())
            };

            if removed > 0 {
                info!("Cache purge: removed {} expired entries", removed);
            } else {
                debug!("Cache purge: no expired entries found");
            }
        }
    })
}
