mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::Value;

#[tokio::test]
async fn test_openapi_document_lists_public_endpoints() {
    let app = spawn_app();

    let response = app.server.get("/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));

    let paths = body["paths"].as_object().unwrap();
    for path in ["/shorten", "/{code}", "/stats/{code}", "/metrics"] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert!(paths["/shorten"].get("post").is_some());
}
