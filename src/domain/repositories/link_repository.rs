//! Repository trait for short link persistence.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Persistence contract for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Atomically persists `link` unless its code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` with `visits = 0` when the row was written
    /// - `Ok(None)` when another link already holds the code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the store only enforces uniqueness
    /// optimistically and rejected the write.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_if_absent(&self, link: NewShortLink) -> Result<Option<ShortLink>, AppError>;

    /// Increments the visit counter of a link by exactly one.
    ///
    /// Returns the link as it is right after this increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_visits(&self, code: &str) -> Result<ShortLink, AppError>;

    /// Sum of `visits` across all links, `0` when there are none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn total_visits(&self) -> Result<i64, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Returns `true` when the backing store answers queries.
    async fn health_check(&self) -> bool;
}
