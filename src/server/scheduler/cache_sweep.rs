//! Periodic eviction of expired cache entries.
//!
//! Reads only evict the entries they touch, so a guild nobody asks about again
//! would otherwise stay in memory forever. The sweeper purges every registered
//! store on a fixed interval, independent of request traffic, and is owned by the
//! application so it can be stopped on shutdown.

use std::{sync::Arc, time::Duration};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{cache::Sweep, server::error::AppError};

pub struct CacheSweeper {
    scheduler: JobScheduler,
}

impl CacheSweeper {
    /// Starts sweeping `stores` every `interval`.
    ///
    /// # Arguments
    /// - `stores` - Stores to purge on each run
    /// - `interval` - Time between runs
    ///
    /// # Returns
    /// - `Ok(CacheSweeper)` - Sweeper running until `shutdown` is called
    /// - `Err(AppError::SchedulerErr)` - The scheduler could not be started
    pub async fn start(stores: Vec<Arc<dyn Sweep>>, interval: Duration) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;
        let stores = Arc::new(stores);

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let stores = Arc::clone(&stores);

            Box::pin(async move {
                sweep_all(&stores);
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!("Cache sweeper started with interval {:?}", interval);

        Ok(Self { scheduler })
    }

    /// Stops the sweeper. No sweep runs after this returns.
    pub async fn shutdown(mut self) -> Result<(), AppError> {
        self.scheduler.shutdown().await?;
        tracing::info!("Cache sweeper stopped");
        Ok(())
    }
}

/// Sweeps every store once, returning the total number of evicted entries.
pub fn sweep_all(stores: &[Arc<dyn Sweep>]) -> usize {
    stores
        .iter()
        .map(|store| {
            let removed = store.sweep();
            if removed > 0 {
                tracing::debug!("Swept {} expired entries from {} store", removed, store.name());
            }
            removed
        })
        .sum()
}
