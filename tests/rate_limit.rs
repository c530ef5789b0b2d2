mod common;

use axum::http::StatusCode;
use common::TestAppBuilder;
use shortlink::api::middleware::rate_limit::RateLimitPolicy;
use std::time::Duration;

fn tight_limit() -> RateLimitPolicy {
    RateLimitPolicy {
        requests: 2,
        window: Duration::from_secs(3600),
        behind_proxy: false,
    }
}

#[tokio::test]
async fn test_requests_past_limit_are_rejected() {
    let app = TestAppBuilder::default().rate_limit(tight_limit()).build();

    assert_eq!(
        app.server.get("/metrics").await.status_code(),
        StatusCode::OK
    );
    assert_eq!(
        app.server.get("/zzz999").await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.server.get("/metrics").await.status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let app = TestAppBuilder::default().rate_limit(tight_limit()).build();

    for _ in 0..5 {
        assert_eq!(
            app.server.get("/health").await.status_code(),
            StatusCode::OK
        );
    }
}

#[tokio::test]
async fn test_openapi_document_is_not_rate_limited() {
    let app = TestAppBuilder::default().rate_limit(tight_limit()).build();

    for _ in 0..5 {
        assert_eq!(
            app.server.get("/openapi.json").await.status_code(),
            StatusCode::OK
        );
    }
}
