//! Application state for the radar API.

use std::sync::Arc;

use mrms_source::{MrmsHttpSource, ReflectivitySource};

use crate::cache::SnapshotCache;
use crate::config::ServiceConfig;

/// Shared application state, built once in `main` and injected into
/// handlers. Owning the cache here (instead of a process global) keeps
/// orchestration deterministic under test.
pub struct AppState {
    pub source: Arc<dyn ReflectivitySource>,
    pub cache: SnapshotCache,
    pub config: ServiceConfig,
}

impl AppState {
    /// Production state: HTTPS source against the configured directory.
    pub fn new(config: ServiceConfig) -> Self {
        let source = Arc::new(MrmsHttpSource::new(config.base_url.clone()));
        Self::with_source(config, source)
    }

    /// State with an injected source, for tests.
    pub fn with_source(config: ServiceConfig, source: Arc<dyn ReflectivitySource>) -> Self {
        Self {
            source,
            cache: SnapshotCache::new(config.cache_ttl),
            config,
        }
    }
}
