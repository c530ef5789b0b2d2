//! Bounded in-process cache backed by moka.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::LinkSnapshot;
use async_trait::async_trait;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use std::future;
use std::time::Duration;
use tracing::{info, trace};

/// Concurrent, size-bounded read cache for link snapshots.
///
/// Entries are evicted once `max_capacity` is reached and, when a TTL is
/// configured, after the TTL elapses. Cloning shares the underlying storage.
#[derive(Debug, Clone)]
pub struct MokaCache {
    cache: Cache<String, LinkSnapshot>,
    max_capacity: u64,
}

impl MokaCache {
    /// Creates a cache holding at most `max_capacity` entries.
    ///
    /// `ttl` of `None` keeps entries until they are evicted.
    pub fn new(max_capacity: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().max_capacity(max_capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        info!(
            max_capacity,
            ttl_secs = ttl.map(|t| t.as_secs()),
            "Read cache enabled"
        );

        Self {
            cache: builder.build(),
            max_capacity,
        }
    }

    /// Approximate number of cached entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Applies pending evictions and bookkeeping immediately.
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl CacheService for MokaCache {
    async fn get(&self, code: &str) -> CacheResult<Option<LinkSnapshot>> {
        match self.cache.get(code).await {
            Some(snapshot) => {
                trace!(code, "Cache HIT");
                Ok(Some(snapshot))
            }
            None => {
                trace!(code, "Cache MISS");
                Ok(None)
            }
        }
    }

    async fn set(&self, code: &str, snapshot: &LinkSnapshot) -> CacheResult<()> {
        let incoming = snapshot.clone();
        let result = self
            .cache
            .entry_by_ref(code)
            .and_compute_with(|current| {
                let op = match current {
                    Some(entry) if entry.value().visits > incoming.visits => Op::Nop,
                    _ => Op::Put(incoming),
                };
                future::ready(op)
            })
            .await;

        match result {
            CompResult::Unchanged(_) => trace!(code, "Cache SET skipped, newer entry cached"),
            _ => trace!(code, "Cache SET"),
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!(
            "In-process cache, {} of {} entries",
            self.entry_count(),
            self.max_capacity
        )
    }
}
