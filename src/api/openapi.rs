//! OpenAPI document for the public API.

use axum::Json;
use utoipa::OpenApi;

use crate::api::dto::{
    metrics::MetricsResponse,
    shorten::{ShortenRequest, ShortenResponse},
    stats::StatsResponse,
};
use crate::api::handlers;
use crate::error::{ErrorBody, ErrorInfo};

#[derive(OpenApi)]
#[openapi(
    info(title = "shortlink", description = "URL shortener API"),
    paths(
        handlers::shorten::shorten_handler,
        handlers::stats::stats_handler,
        handlers::metrics::metrics_handler,
        handlers::redirect::redirect_handler,
    ),
    components(schemas(
        ShortenRequest,
        ShortenResponse,
        StatsResponse,
        MetricsResponse,
        ErrorBody,
        ErrorInfo,
    )),
    tags((name = "links", description = "Short link creation, redirects and statistics"))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
///
/// `GET /openapi.json`
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
