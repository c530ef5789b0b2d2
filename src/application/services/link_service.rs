//! Link allocation, lookup and visit counting.

use std::sync::Arc;

use crate::domain::entities::{LinkSnapshot, NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{
    CodeGenerator, DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, is_reserved_code, is_well_formed_code,
};
use crate::utils::url_validator::validate_original_url;
use serde_json::json;
use tracing::{debug, info, warn};

/// Bounds for the collision-retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationPolicy {
    /// Length of the first candidates.
    pub code_length: usize,
    /// Total candidates tried before giving up.
    pub max_attempts: usize,
    /// Consecutive collisions after which candidates grow by one character.
    pub widen_after: usize,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: 10,
            widen_after: 5,
        }
    }
}

/// Service for creating, resolving and counting short links.
///
/// Owns the read cache: every read goes through it and every visit increment
/// writes the updated projection back.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn CodeGenerator>,
    policy: AllocationPolicy,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        generator: Arc<dyn CodeGenerator>,
        policy: AllocationPolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            generator,
            policy,
        }
    }

    /// Allocates a fresh code for `original_url` and persists the mapping.
    ///
    /// # Code Allocation
    ///
    /// - Candidates come from the configured [`CodeGenerator`]
    /// - Reserved route names are skipped
    /// - Each candidate is written with an atomic insert-if-absent; a taken code
    ///   (or a uniqueness violation from the store) counts as a collision
    /// - After `widen_after` consecutive collisions the candidate length grows by
    ///   one, up to [`MAX_CODE_LENGTH`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is malformed.
    /// Returns [`AppError::Exhausted`] once `max_attempts` candidates collided.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn shorten(&self, original_url: String) -> Result<ShortLink, AppError> {
        validate_original_url(&original_url)?;

        let mut length = self.policy.code_length;
        let mut streak = 0;

        for attempt in 1..=self.policy.max_attempts {
            let candidate = self.generator.generate(length);

            let taken = if is_reserved_code(&candidate) {
                true
            } else {
                let new_link = NewShortLink {
                    code: candidate.clone(),
                    original_url: original_url.clone(),
                };

                match self.repository.insert_if_absent(new_link).await {
                    Ok(Some(link)) => {
                        metrics::counter!("shortlink_links_created_total").increment(1);
                        info!(code = %link.code, attempt, "Short link created");
                        return Ok(link);
                    }
                    Ok(None) | Err(AppError::Conflict { .. }) => true,
                    Err(e) => return Err(e),
                }
            };

            if taken {
                metrics::counter!("shortlink_code_collisions_total").increment(1);
                debug!(code = %candidate, attempt, "Code collision, retrying");

                streak += 1;
                if streak >= self.policy.widen_after {
                    length = (length + 1).min(MAX_CODE_LENGTH);
                    streak = 0;
                    debug!(length, "Widening code length");
                }
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            "Failed to allocate a unique code"
        );

        Err(AppError::exhausted(
            "Failed to allocate a unique code",
            json!({ "attempts": self.policy.max_attempts, "last_length": length }),
        ))
    }

    /// Resolves a code to its link projection through the read cache.
    ///
    /// A cache hit never touches persistence. On a miss the store is queried and
    /// a found link is cached. Unknown codes are not cached.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn lookup(&self, code: &str) -> Result<LinkSnapshot, AppError> {
        if !is_well_formed_code(code) {
            return Err(not_found(code));
        }

        match self.cache.get(code).await {
            Ok(Some(snapshot)) => {
                metrics::counter!("shortlink_cache_hits_total").increment(1);
                return Ok(snapshot);
            }
            Ok(None) => {
                metrics::counter!("shortlink_cache_misses_total").increment(1);
            }
            Err(e) => {
                warn!(code, error = %e, "Cache read failed, falling back to storage");
            }
        }

        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))?;

        let snapshot = link.snapshot();
        if let Err(e) = self.cache.set(code, &snapshot).await {
            warn!(code, error = %e, "Failed to cache link");
        }

        Ok(snapshot)
    }

    /// Adds one visit to `code` and caches the updated projection.
    ///
    /// The cache keeps whichever snapshot has more visits, so a lookup that
    /// read the row before this increment cannot bring back the old count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn record_visit(&self, code: &str) -> Result<(), AppError> {
        let link = self.repository.increment_visits(code).await?;

        if let Err(e) = self.cache.set(code, &link.snapshot()).await {
            warn!(code, error = %e, "Failed to cache visited link");
        }

        Ok(())
    }

    /// Total number of counted redirects across all links.
    ///
    /// Always read from storage, never from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn total_redirects(&self) -> Result<i64, AppError> {
        self.repository.total_visits().await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Reports whether persistence is reachable.
    pub async fn storage_healthy(&self) -> bool {
        self.repository.health_check().await
    }

    /// Reports cache health with a description for health checks.
    pub async fn cache_status(&self) -> (bool, String) {
        (self.cache.health_check().await, self.cache.describe())
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
