//! Short link entity and its cached projection.

use chrono::{DateTime, Utc};

/// A persisted mapping from a short code to an original URL.
///
/// Created once by the allocation resolver and afterwards only mutated through
/// the visit counter. Codes are never reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub original_url: String,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        code: String,
        original_url: String,
        visits: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            original_url,
            visits,
            created_at,
        }
    }

    /// Projection stored in the read cache.
    pub fn snapshot(&self) -> LinkSnapshot {
        LinkSnapshot {
            original_url: self.original_url.clone(),
            visits: self.visits,
            created_at: self.created_at,
        }
    }
}

/// Input data for persisting a new link. Visits start at zero and the
/// store assigns `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub code: String,
    pub original_url: String,
}

/// Non-authoritative copy of a [`ShortLink`] kept in the read cache, keyed by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSnapshot {
    pub original_url: String,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
}

impl From<ShortLink> for LinkSnapshot {
    fn from(link: ShortLink) -> Self {
        Self {
            original_url: link.original_url,
            visits: link.visits,
            created_at: link.created_at,
        }
    }
}
