//! HTTP request handlers for the gallery API.
//!
//! # Endpoints
//!
//! - `GET /api/get-image-data` - List images with presigned access URLs
//! - `GET /api/get-twitter-data` - Proxy the Twitter profile lookup
//! - `GET /health` - Health check endpoint
//! - anything else - 404

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{ProfileError, StorageError};
use crate::profile::ProfileSource;
use crate::storage::{ImageDescriptor, ImageStore, PRESIGNED_URL_TTL};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state: the image store and the profile source.
///
/// Passed to all handlers via Axum's State extractor.
pub struct AppState<S: ImageStore, P: ProfileSource> {
    /// Object-storage backend for listing and presigning
    pub store: Arc<S>,

    /// Third-party profile backend
    pub profile: Arc<P>,
}

impl<S: ImageStore, P: ProfileSource> AppState<S, P> {
    /// Create a new application state.
    pub fn new(store: S, profile: P) -> Self {
        Self {
            store: Arc::new(store),
            profile: Arc::new(profile),
        }
    }
}

impl<S: ImageStore, P: ProfileSource> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            profile: Arc::clone(&self.profile),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Response from the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    /// Every image under the gallery prefix, each with a presigned URL
    pub images: Vec<ImageDescriptor>,
}

/// Response from the profile endpoint.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The Twitter user object, passed through as-is
    #[serde(rename = "twitterData")]
    pub twitter_data: serde_json::Value,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// JSON error body: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

impl ErrorBody {
    /// Create a new error body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Wrapper for listing failures to implement IntoResponse.
///
/// Every upstream failure (listing or presigning) maps to a 500 carrying
/// the underlying message; the response never contains partial results.
pub struct ListingError(pub StorageError);

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();

        error!(
            status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            "Operation failed: {}", message
        );

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(message)),
        )
            .into_response()
    }
}

impl From<StorageError> for ListingError {
    fn from(err: StorageError) -> Self {
        ListingError(err)
    }
}

/// Wrapper for profile failures to implement IntoResponse.
pub struct ProfileFetchError(pub ProfileError);

impl IntoResponse for ProfileFetchError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();

        error!(
            status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            "Operation failed: {}", message
        );

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(message)),
        )
            .into_response()
    }
}

impl From<ProfileError> for ProfileFetchError {
    fn from(err: ProfileError) -> Self {
        ProfileFetchError(err)
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle image listing requests.
///
/// # Endpoint
///
/// `GET /api/get-image-data`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "images": [
///     { "key": "images/a.jpg", "size": 123,
///       "lastModified": "2024-01-01T12:00:00.000Z",
///       "url": "https://..." }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Origin header absent or mismatched (gate)
/// - `500 Internal Server Error`: Missing environment (gate), listing or
///   presigning failure
pub async fn list_images_handler<S: ImageStore, P: ProfileSource>(
    State(state): State<AppState<S, P>>,
) -> Result<Json<ListingResponse>, ListingError> {
    let images = state.store.list_images().await?;

    info!(image_count = images.len(), "Generating presigned URLs for images");

    // Presign all URLs concurrently; one failure fails the whole response.
    let images = try_join_all(images.into_iter().map(|image| {
        let store = Arc::clone(&state.store);
        async move {
            let url = store.presign_get(&image.key, PRESIGNED_URL_TTL).await?;
            Ok::<_, StorageError>(image.with_url(url))
        }
    }))
    .await?;

    info!(image_count = images.len(), "Images retrieved successfully");

    Ok(Json(ListingResponse { images }))
}

/// Handle profile proxy requests.
///
/// # Endpoint
///
/// `GET /api/get-twitter-data`
///
/// # Response
///
/// `200 OK` with JSON body `{ "twitterData": { ... } }`.
///
/// # Errors
///
/// - `403 Forbidden`: Origin header absent or mismatched (gate)
/// - `500 Internal Server Error`: Missing environment (gate), secret
///   retrieval or Twitter API failure
pub async fn profile_handler<S: ImageStore, P: ProfileSource>(
    State(state): State<AppState<S, P>>,
) -> Result<Json<ProfileResponse>, ProfileFetchError> {
    let twitter_data = state.profile.profile().await?;

    info!("Twitter data retrieved successfully");

    Ok(Json(ProfileResponse { twitter_data }))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback handler for unrecognized paths.
///
/// Runs behind the gate: a bad origin header yields 403 before this 404.
pub async fn not_found_handler(OriginalUri(uri): OriginalUri) -> Response {
    warn!(path = uri.path(), "Unknown path requested");

    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Endpoint not found")),
    )
        .into_response()
}

// =============================================================================
// Tests
// =============================================================================
