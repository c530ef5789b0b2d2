//! Read cache in front of link persistence.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`MokaCache`] - bounded, concurrent in-process cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod moka_cache;
mod null_cache;
mod service;

pub use moka_cache::MokaCache;
pub use null_cache::NullCache;
pub use service::{CacheError, CacheResult, CacheService};
