use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::Object;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use super::{ImageDescriptor, ImageStore, LISTING_PREFIX};
use crate::error::StorageError;

/// S3-backed implementation of [`ImageStore`].
///
/// Lists objects under the gallery prefix with ListObjectsV2 and signs
/// per-object GET URLs. Works against AWS S3 or S3-compatible storage
/// (MinIO, GCS interop, etc.).
#[derive(Clone)]
pub struct S3ImageStore {
    client: Client,
    bucket: String,
}

impl S3ImageStore {
    /// Create a new store for the given bucket.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn list_images(&self) -> Result<Vec<ImageDescriptor>, StorageError> {
        debug!(bucket = %self.bucket, prefix = LISTING_PREFIX, "Listing images from S3");

        let mut images = Vec::new();
        let mut continuation_token: Option<String> = None;

        // Follow continuation markers until the listing is exhausted so a
        // bucket larger than one page never silently truncates.
        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(LISTING_PREFIX);

            if let Some(token) = continuation_token {
                request = request.continuation_token(token);
            }

            let result = request
                .send()
                .await
                .map_err(|e| StorageError::List(e.to_string()))?;

            images.extend(result.contents().iter().filter_map(to_descriptor));

            if result.is_truncated() == Some(true) {
                continuation_token = result.next_continuation_token().map(|s| s.to_string());
            } else {
                break;
            }
        }

        info!(
            bucket = %self.bucket,
            image_count = images.len(),
            "Images listed successfully"
        );

        Ok(images)
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        // The URL grants read access without further auth; never log it.
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}

/// Map one S3 object to a descriptor, dropping directory markers.
fn to_descriptor(object: &Object) -> Option<ImageDescriptor> {
    let key = object.key()?;
    if key.ends_with('/') {
        return None;
    }

    Some(ImageDescriptor {
        key: key.to_string(),
        size: object.size().unwrap_or(0).max(0) as u64,
        last_modified: object
            .last_modified()
            .and_then(|dt| dt.to_millis().ok())
            .map(format_last_modified)
            .unwrap_or_default(),
        url: None,
    })
}

/// Format epoch milliseconds as ISO-8601 with milliseconds ("...T12:00:00.000Z").
fn format_last_modified(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
        .unwrap_or_default()
}

/// Create an S3 client with optional custom endpoint and region.
///
/// Use a custom endpoint for S3-compatible services like MinIO:
/// ```ignore
/// let client = create_s3_client(Some("http://localhost:9000"), "us-east-1").await;
/// ```
///
/// For AWS S3, pass `None` to use the default endpoint.
pub async fn create_s3_client(endpoint_url: Option<&str>, region: &str) -> Client {
    let region = aws_config::Region::new(region.to_string());
    let mut config_loader =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint) = endpoint_url {
        config_loader = config_loader.endpoint_url(endpoint);
    }

    let sdk_config = config_loader.load().await;

    // S3-compatible services usually need path-style addressing
    let s3_config = if endpoint_url.is_some() {
        aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build()
    } else {
        aws_sdk_s3::config::Builder::from(&sdk_config).build()
    };

    Client::from_conf(s3_config)
}

// =============================================================================
// Tests
// =============================================================================
