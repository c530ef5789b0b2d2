//! Per-client rate limiting (GCRA via `tower_governor`).

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Rate limiting layer applied to the public API.
pub type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Quota granted to each client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Requests allowed per window, also used as the burst size.
    pub requests: u32,
    pub window: Duration,
    /// Trust `X-Forwarded-For` / `X-Real-IP` / `Forwarded` headers.
    pub behind_proxy: bool,
}

impl RateLimitPolicy {
    /// Time needed to replenish a single request slot.
    pub fn replenish_period(&self) -> Duration {
        self.window / self.requests.max(1)
    }
}

/// Keys requests by client IP.
///
/// Reads proxy headers only when configured to, otherwise uses the socket
/// peer address from `ConnectInfo`.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl ClientIpKeyExtractor {
    pub fn new(behind_proxy: bool) -> Self {
        Self { behind_proxy }
    }
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

/// Creates the rate limiter for public endpoints.
///
/// Each client may burst up to `policy.requests` requests; one slot is
/// replenished every `window / requests`. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// # Errors
///
/// Returns an error if the policy has a zero quota or a zero replenish period.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::layer(config.rate_limit_policy())?);
/// ```
pub fn layer(policy: RateLimitPolicy) -> anyhow::Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor::new(policy.behind_proxy))
        .period(policy.replenish_period())
        .burst_size(policy.requests)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit policy: {policy:?}"))?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
