//! Process-local link repository backed by a concurrent map.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// In-memory repository selected with `STORAGE_BACKEND=memory`.
///
/// Data lives only as long as the process. `DashMap`'s entry API makes
/// insert-if-absent atomic per code, matching the guarantee of the
/// PostgreSQL unique constraint.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn insert_if_absent(
        &self,
        new_link: NewShortLink,
    ) -> Result<Option<ShortLink>, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Ok(None),
            Entry::Vacant(slot) => {
                let link = ShortLink::new(new_link.code, new_link.original_url, 0, Utc::now());
                slot.insert(link.clone());
                Ok(Some(link))
            }
        }
    }

    async fn increment_visits(&self, code: &str) -> Result<ShortLink, AppError> {
        match self.links.get_mut(code) {
            Some(mut link) => {
                link.visits += 1;
                Ok(link.clone())
            }
            None => Err(AppError::not_found("Short link not found", json!({ "code": code }))),
        }
    }

    async fn total_visits(&self) -> Result<i64, AppError> {
        Ok(self.links.iter().map(|entry| entry.visits).sum())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.len() as i64)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
