//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Returns the original URL, visit count and creation time of a short link.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
#[utoipa::path(
    get,
    path = "/stats/{code}",
    tag = "links",
    params(("code" = String, Path, description = "Short code")),
    responses(
        (status = 200, description = "Link statistics", body = StatsResponse),
        (status = 404, description = "Unknown short code", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded")
    )
)]
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let snapshot = state.link_service.lookup(&code).await?;

    Ok(Json(snapshot.into()))
}
