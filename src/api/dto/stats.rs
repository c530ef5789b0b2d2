//! DTOs for per-link statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::LinkSnapshot;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub original_url: String,
    pub visits: i64,
    pub created_at: DateTime<Utc>,
}

impl From<LinkSnapshot> for StatsResponse {
    fn from(snapshot: LinkSnapshot) -> Self {
        Self {
            original_url: snapshot.original_url,
            visits: snapshot.visits,
            created_at: snapshot.created_at,
        }
    }
}
