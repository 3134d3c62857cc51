//! Periodic sync timer.

use std::time::Duration;

use post_core::PostService;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config;

/// Spawns a background task that runs a sync every `period`.
///
/// A tick may overlap a manual `/callRestGet`; both paths go through the
/// same reconcile, so the overlap is harmless beyond last-writer-wins on
/// individual rows. The first sync fires after one full period, not at
/// startup. A zero `period` falls back to the default sync interval.
pub fn spawn_sync_timer(service: PostService, period: Duration) -> JoinHandle<()> {
    // tokio's interval panics on a zero period, and inside the detached
    // task that would kill the sync loop with nothing observing it.
    let period = if period.is_zero() {
        warn!("sync period of zero, using the default interval");
        Duration::from_secs(config::DEFAULT_SYNC_INTERVAL_SECS)
    } else {
        period
    };
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // An interval's first tick completes immediately; swallow it so
        // startup does not hammer the source before the server is up.
        interval.tick().await;
        loop {
            interval.tick().await;
            info!("scheduled sync starting");
            match service.refresh().await {
                Ok(saved) => info!(saved, "scheduled sync finished"),
                Err(err) => error!(error = %err, "scheduled sync failed"),
            }
        }
    })
}
