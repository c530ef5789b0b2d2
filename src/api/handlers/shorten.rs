//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortUrl": "http://localhost:3000/abc123" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON or the URL is invalid.
/// Returns 503 Service Unavailable if no free code could be allocated.
#[utoipa::path(
    post,
    path = "/shorten",
    tag = "links",
    request_body = ShortenRequest,
    responses(
        (status = 200, description = "Short URL created", body = ShortenResponse),
        (status = 400, description = "Malformed body or invalid URL", body = ErrorBody),
        (status = 429, description = "Rate limit exceeded"),
        (status = 503, description = "No free code could be allocated", body = ErrorBody)
    )
)]
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;

    let link = state.link_service.shorten(payload.url).await?;

    Ok(Json(ShortenResponse {
        short_url: state.link_service.short_url(&state.base_url, &link.code),
    }))
}
