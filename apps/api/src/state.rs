use std::sync::Arc;

use crate::cache::{AnalysisStore, InMemoryAnalysisStore};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable per-job analysis cache. Default: bounded in-memory LRU sized by
    /// ANALYSIS_CACHE_CAPACITY.
    pub analysis_store: Arc<dyn AnalysisStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let analysis_store = Arc::new(InMemoryAnalysisStore::new(config.analysis_cache_capacity));
        Self {
            config,
            analysis_store,
        }
    }
}
