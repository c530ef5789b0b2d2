//! Handler for the aggregate redirect counter.

use axum::{Json, extract::State};

use crate::api::dto::metrics::MetricsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the sum of visits over all links.
///
/// `GET /metrics` → `{ "totalRedirects": 42 }`
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "links",
    responses(
        (status = 200, description = "Total redirects", body = MetricsResponse),
        (status = 429, description = "Rate limit exceeded")
    )
)]
pub async fn metrics_handler(
    State(state): State<AppState>,
) -> Result<Json<MetricsResponse>, AppError> {
    let total_redirects = state.link_service.total_redirects().await?;

    Ok(Json(MetricsResponse { total_redirects }))
}
