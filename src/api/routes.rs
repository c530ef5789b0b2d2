//! API route configuration.

use crate::api::handlers::{metrics_handler, redirect_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public routes subject to per-client rate limiting.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create a short URL
/// - `GET  /stats/{code}` - Original URL, visit count and creation time
/// - `GET  /metrics`      - Total redirects across all links
/// - `GET  /{code}`       - Redirect to the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/metrics", get(metrics_handler))
        .route("/{code}", get(redirect_handler))
}
