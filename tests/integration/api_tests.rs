//! API integration tests for the listing and profile endpoints.
//!
//! Tests verify:
//! - Listing responses carry presigned URLs for every image
//! - Upstream failures map to a single 500 with the underlying message
//! - The profile proxy wraps the user object under `twitterData`
//! - Unknown paths answer 404 with the documented body

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gallery_api::ProfileError;

use super::test_utils::{
    test_router, MockImageStore, MockProfileSource, ORIGIN_HEADER, ORIGIN_VALUE,
};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(ORIGIN_HEADER, ORIGIN_VALUE)
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_listing_success() {
    let store = MockImageStore::new()
        .with_image("images/a.jpg", 123, "2024-01-01T12:00:00.000Z")
        .with_image("images/b.png", 456, "2024-02-01T00:00:00.000Z");
    let router = test_router(store, MockProfileSource::ok(serde_json::json!({})));

    let response = router.oneshot(get("/api/get-image-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let images = json["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);

    // listing order preserved, every image presigned
    assert_eq!(images[0]["key"], "images/a.jpg");
    assert_eq!(images[0]["size"], 123);
    assert_eq!(images[0]["lastModified"], "2024-01-01T12:00:00.000Z");
    assert_eq!(images[0]["url"], "https://signed.test/images/a.jpg");
    assert_eq!(images[1]["url"], "https://signed.test/images/b.png");
}

#[tokio::test]
async fn test_listing_empty_bucket() {
    let router = test_router(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
    );

    let response = router.oneshot(get("/api/get-image-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "images": [] }));
}

#[tokio::test]
async fn test_listing_failure_is_single_500_with_message() {
    let store = MockImageStore::new().with_listing_error("access denied");
    let router = test_router(store, MockProfileSource::ok(serde_json::json!({})));

    let response = router.oneshot(get("/api/get-image-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "S3 error: access denied");
    // no partial image list alongside the error
    assert!(json.get("images").is_none());
}

#[tokio::test]
async fn test_presign_failure_fails_whole_response() {
    let store = MockImageStore::new()
        .with_images(3)
        .with_presign_error("signing key unavailable");
    let router = test_router(store, MockProfileSource::ok(serde_json::json!({})));

    let response = router.oneshot(get("/api/get-image-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Failed to generate presigned URL: signing key unavailable"
    );
    assert!(json.get("images").is_none());
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_profile_success() {
    let profile = MockProfileSource::ok(serde_json::json!({
        "id": "123",
        "username": "alice",
        "public_metrics": { "tweet_count": 42 }
    }));
    let router = test_router(MockImageStore::new(), profile);

    let response = router.oneshot(get("/api/get-twitter-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["twitterData"]["username"], "alice");
    assert_eq!(json["twitterData"]["public_metrics"]["tweet_count"], 42);
}

#[tokio::test]
async fn test_profile_secret_not_configured() {
    let profile = MockProfileSource::err(ProfileError::SecretNotConfigured);
    let router = test_router(MockImageStore::new(), profile);

    let response = router.oneshot(get("/api/get-twitter-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "TWITTER_SECRET_ARN not set");
}

#[tokio::test]
async fn test_profile_incomplete_credentials() {
    let profile = MockProfileSource::err(ProfileError::IncompleteCredentials);
    let router = test_router(MockImageStore::new(), profile);

    let response = router.oneshot(get("/api/get-twitter-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required Twitter credentials in secret");
}

#[tokio::test]
async fn test_profile_api_failure() {
    let profile = MockProfileSource::err(ProfileError::Api("Twitter API returned 429".into()));
    let router = test_router(MockImageStore::new(), profile);

    let response = router.oneshot(get("/api/get-twitter-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Twitter API returned 429");
}

// =============================================================================
// Unknown Paths & Health
// =============================================================================

#[tokio::test]
async fn test_unknown_path_is_404() {
    let router = test_router(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
    );

    let response = router.oneshot(get("/api/does-not-exist")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "error": "Endpoint not found" }));
}

#[tokio::test]
async fn test_api_routes_reject_post() {
    let router = test_router(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
    );

    let request = Request::builder()
        .method("POST")
        .uri("/api/get-image-data")
        .header(ORIGIN_HEADER, ORIGIN_VALUE)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = test_router(
        MockImageStore::new(),
        MockProfileSource::ok(serde_json::json!({})),
    );

    // no origin header required
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}
