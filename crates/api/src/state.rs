use std::sync::Arc;

use crate::cache::StatisticsCache;
use crate::config::ServerConfig;
use crate::storage::DocumentStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: crm_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Short-lived cache in front of the statistics aggregate.
    pub statistics: StatisticsCache,
    /// On-disk storage for contract documents.
    pub documents: DocumentStore,
}

impl AppState {
    pub fn new(pool: crm_db::DbPool, config: ServerConfig) -> Self {
        let statistics = StatisticsCache::new(config.statistics_ttl());
        let documents = DocumentStore::new(config.media_root.clone());
        Self {
            pool,
            config: Arc::new(config),
            statistics,
            documents,
        }
    }
}
