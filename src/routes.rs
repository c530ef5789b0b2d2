//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`, `GET /stats/{code}`, `GET /metrics`, `GET /{code}` - Public API (rate limited)
//! - `GET  /health` - Health check: storage, cache, visit queue (not rate limited)
//! - `GET  /openapi.json` - OpenAPI document (not rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP GCRA bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RateLimitPolicy};
use crate::api::middleware::tracing;
use crate::api::openapi::openapi_handler;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes and middleware without path normalization.
///
/// Rate-limited routes key on `ConnectInfo<SocketAddr>` unless the policy
/// trusts proxy headers, so the router must be served with connect info.
///
/// # Errors
///
/// Returns an error if the rate limit policy is invalid.
pub fn build_router(state: AppState, rate_limit: RateLimitPolicy) -> Result<Router> {
    let public = api::routes::public_routes().layer(rate_limit::layer(rate_limit)?);

    Ok(Router::new()
        .route("/health", get(health_handler))
        .route("/openapi.json", get(openapi_handler))
        .merge(public)
        .with_state(state)
        .layer(tracing::layer()))
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/stats/abc123/` hits
/// the same handler as `/stats/abc123`.
///
/// # Errors
///
/// Returns an error if the rate limit policy is invalid.
pub fn app_router(state: AppState, rate_limit: RateLimitPolicy) -> Result<NormalizePath<Router>> {
    let router = build_router(state, rate_limit)?;

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
