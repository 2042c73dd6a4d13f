//! Object-storage layer.
//!
//! This module provides the listing and presigned-URL operations behind the
//! [`ImageStore`] trait, so the HTTP handlers can be exercised against a mock
//! backend in tests:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            ImageStore Trait             │
//! │   (list images, presign access URLs)    │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │             S3ImageStore                │
//! │  (ListObjectsV2 + GetObject presigning) │
//! └─────────────────────────────────────────┘
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

mod s3;

pub use s3::{create_s3_client, S3ImageStore};

/// Key prefix under which gallery images live in the bucket.
pub const LISTING_PREFIX: &str = "images/";

/// Lifetime of presigned access URLs (15 minutes).
pub const PRESIGNED_URL_TTL: Duration = Duration::from_secs(900);

// =============================================================================
// Image Descriptor
// =============================================================================

/// One stored image, as returned by the listing endpoint.
///
/// Constructed fresh on every listing request and never mutated after
/// construction. The `url`, when present, is a short-lived presigned URL
/// and must not be cached beyond the response lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Opaque storage key, unique within a listing
    pub key: String,

    /// Object size in bytes
    pub size: u64,

    /// Last-modified timestamp as ISO-8601 with milliseconds, or "" if unknown
    #[serde(rename = "lastModified")]
    pub last_modified: String,

    /// Time-limited access URL; absent until presigning has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageDescriptor {
    /// Return a copy of this descriptor with the given access URL attached.
    pub fn with_url(self, url: String) -> Self {
        Self {
            url: Some(url),
            ..self
        }
    }
}

// =============================================================================
// ImageStore Trait
// =============================================================================

/// Backend capable of listing gallery images and presigning access URLs.
///
/// This abstraction decouples the HTTP handlers from S3 so tests can run
/// against an in-memory implementation.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// List every image under the gallery prefix.
    ///
    /// The listing is exhaustive: implementations follow continuation
    /// markers until the backend reports no further pages. Directory
    /// markers (keys with a trailing separator) are excluded. Returned
    /// descriptors carry no `url`.
    async fn list_images(&self) -> Result<Vec<ImageDescriptor>, StorageError>;

    /// Generate a time-limited GET URL for one object.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError>;
}
