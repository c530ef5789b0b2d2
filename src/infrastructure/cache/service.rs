//! Cache service trait and error types.

use crate::domain::entities::LinkSnapshot;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read cache for short link projections, keyed by code.
///
/// Implementations must be thread-safe. The cache is never authoritative:
/// callers treat errors as misses and fall back to persistence.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MokaCache`] - bounded in-process cache
/// - [`crate::infrastructure::cache::NullCache`] - no-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached snapshot for `code`.
    ///
    /// - `Ok(Some(snapshot))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get(&self, code: &str) -> CacheResult<Option<LinkSnapshot>>;

    /// Stores a snapshot under `code` unless the cached one has more visits.
    ///
    /// Visit counts only grow, so the snapshot with the larger count is the
    /// fresher one. A read that loaded its row before a concurrent increment
    /// must not replace the snapshot written after that increment.
    async fn set(&self, code: &str, snapshot: &LinkSnapshot) -> CacheResult<()>;

    /// Checks if the cache backend is usable.
    async fn health_check(&self) -> bool;

    /// Human readable description for health reports.
    fn describe(&self) -> String;
}
