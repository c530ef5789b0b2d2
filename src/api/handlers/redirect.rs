//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::config::VisitCounting;
use crate::domain::visit_event::VisitEvent;
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code through the link cache (storage on a miss)
/// 2. Count the visit
/// 3. Return 302 Found with `Location` set to the original URL
///
/// # Visit Counting
///
/// - **best_effort**: the visit is queued for the background worker. If the
///   queue is full the visit is dropped and the redirect still succeeds.
/// - **strict**: the increment is persisted before responding and a storage
///   failure fails the request.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist. No visit is counted.
#[utoipa::path(
    get,
    path = "/{code}",
    tag = "links",
    params(("code" = String, Path, description = "Short code")),
    responses(
        (
            status = 302,
            description = "Redirect to the original URL",
            headers(("location" = String, description = "Original URL"))
        ),
        (status = 404, description = "Unknown short code", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded")
    )
)]
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.lookup(&code).await?;

    match state.visit_counting {
        VisitCounting::Strict => state.link_service.record_visit(&code).await?,
        VisitCounting::BestEffort => {
            if let Err(e) = state.visit_sender.try_send(VisitEvent::new(code)) {
                metrics::counter!("shortlink_visits_dropped_total").increment(1);
                match e {
                    TrySendError::Full(ev) => {
                        warn!(code = %ev.code, "Visit queue full, dropping visit")
                    }
                    TrySendError::Closed(ev) => {
                        warn!(code = %ev.code, "Visit queue closed, dropping visit")
                    }
                }
            }
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, link.original_url)]))
}
