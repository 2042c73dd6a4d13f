//! Request gate integration tests.
//!
//! Tests verify:
//! - Missing or mismatched origin headers always answer 403
//! - Missing environment values answer 500 with the exact names
//! - Check ordering (environment before origin, origin before dispatch)
//! - The health endpoint stays outside the gate

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use super::test_utils::{
    test_config, test_router, test_router_with_config, MockImageStore, MockProfileSource,
    ORIGIN_HEADER, ORIGIN_VALUE,
};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn default_router() -> axum::Router {
    test_router(
        MockImageStore::new().with_images(1),
        MockProfileSource::ok(serde_json::json!({})),
    )
}

// =============================================================================
// Origin Header
// =============================================================================

#[tokio::test]
async fn test_missing_origin_header_forbidden() {
    let request = Request::builder()
        .uri("/api/get-image-data")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "error": "Forbidden" }));
}

#[tokio::test]
async fn test_wrong_origin_value_forbidden() {
    let request = Request::builder()
        .uri("/api/get-image-data")
        .header(ORIGIN_HEADER, "not-the-secret")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bad_origin_beats_unknown_path() {
    // 403 regardless of path validity
    let request = Request::builder()
        .uri("/api/does-not-exist")
        .header(ORIGIN_HEADER, "not-the-secret")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_valid_origin_passes() {
    let request = Request::builder()
        .uri("/api/get-image-data")
        .header(ORIGIN_HEADER, ORIGIN_VALUE)
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_profile_path_gated_too() {
    let request = Request::builder()
        .uri("/api/get-twitter-data")
        .body(Body::empty())
        .unwrap();

    let response = default_router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Environment Validation
// =============================================================================

#[tokio::test]
async fn test_missing_bucket_reported_with_name() {
    let mut config = test_config();
    config.bucket = None;
    let router = test_router_with_config(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
        config,
    );

    // the request is otherwise well-formed
    let request = Request::builder()
        .uri("/api/get-image-data")
        .header(ORIGIN_HEADER, ORIGIN_VALUE)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "missing": ["IMAGE_BUCKET_NAME"] }));
}

#[tokio::test]
async fn test_all_missing_env_names_listed() {
    let mut config = test_config();
    config.bucket = None;
    config.origin_header_name = None;
    config.origin_header_value = None;
    let router = test_router_with_config(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
        config,
    );

    let request = Request::builder()
        .uri("/api/get-image-data")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "missing": ["IMAGE_BUCKET_NAME", "ORIGIN_HEADER_NAME", "ORIGIN_HEADER_VALUE"]
        })
    );
}

#[tokio::test]
async fn test_missing_env_beats_bad_origin() {
    let mut config = test_config();
    config.bucket = None;
    let router = test_router_with_config(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
        config,
    );

    let request = Request::builder()
        .uri("/api/get-image-data")
        .header(ORIGIN_HEADER, "not-the-secret")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_unaffected_by_missing_env() {
    let mut config = test_config();
    config.bucket = None;
    config.origin_header_name = None;
    config.origin_header_value = None;
    let router = test_router_with_config(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
        config,
    );

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
