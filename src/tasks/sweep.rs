//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ExpiringCache;

/// Spawns a task that calls `clear_expired` on `cache` every interval.
///
/// The sweep is blocking store I/O, so each run is moved onto the blocking
/// pool.
///
/// # Arguments
/// * `cache` - Shared cache to sweep
/// * `interval_secs` - Seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted by the owner on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(ExpiringCache::new(Arc::new(MemoryStore::new())));
/// let sweep_handle = spawn_sweep_task(cache.clone(), 60);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: Arc<ExpiringCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let cache = cache.clone();
            let removed = match tokio::task::spawn_blocking(move || cache.clear_expired()).await {
                Ok(removed) => removed,
                Err(e) => {
                    debug!("Expiry sweep did not complete: {}", e);
                    continue;
                }
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} entries", removed);
            } else {
                debug!("Expiry sweep: nothing to remove");
            }
        }
    })
}
