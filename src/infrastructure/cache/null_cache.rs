//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::LinkSnapshot;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Selected with `CACHE_CAPACITY=0`. Every lookup goes to persistence.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _code: &str) -> CacheResult<Option<LinkSnapshot>> {
        Ok(None)
    }

    async fn set(&self, _code: &str, _snapshot: &LinkSnapshot) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "Caching disabled".to_string()
    }
}
