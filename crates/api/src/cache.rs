//! Response-level cache for the statistics endpoint.
//!
//! The aggregate touches every lead, active client, contract and campaign, so
//! a computed [`Statistics`] value is reused until its TTL elapses. Writes do
//! not invalidate it; readers may see values up to one TTL old.

use std::future::Future;
use std::time::Duration;

use crm_core::statistics::Statistics;
use moka::future::Cache;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct StatisticsCache {
    /// `None` when caching is disabled (zero TTL).
    inner: Option<Cache<(), Statistics>>,
}

impl StatisticsCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = (!ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build()
        });
        Self { inner }
    }

    /// Return the cached statistics, running `load` on a miss.
    ///
    /// Concurrent misses share a single `load` call.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> AppResult<Statistics>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Statistics, sqlx::Error>>,
    {
        let Some(cache) = &self.inner else {
            return Ok(load().await?);
        };

        cache
            .try_get_with((), load())
            .await
            .map_err(|e| AppError::InternalError(format!("Statistics query failed: {e}")))
    }
}
