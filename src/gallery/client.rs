use http::header::CACHE_CONTROL;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::storage::ImageDescriptor;

/// Path of the listing endpoint, relative to the backend base URL.
const LISTING_PATH: &str = "/api/get-image-data";

/// HTTP client for the gallery's single listing fetch.
///
/// Issues one GET with caching disabled so the browser never serves a
/// stale listing with expired presigned URLs. There is no retry: a failed
/// fetch surfaces as an error state in the view.
#[derive(Clone)]
pub struct GalleryClient {
    http: reqwest::Client,
    base_url: String,
    origin_header: Option<(String, String)>,
}

impl GalleryClient {
    /// Create a client against the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            origin_header: None,
        }
    }

    /// Attach the shared-secret origin header to every request.
    pub fn with_origin_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.origin_header = Some((name.into(), value.into()));
        self
    }

    /// Fetch the complete image listing.
    ///
    /// A response without an `images` field counts as an empty listing,
    /// not an error.
    pub async fn fetch_images(&self) -> Result<Vec<ImageDescriptor>, FetchError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), LISTING_PATH);

        debug!(url = %url, "Fetching image listing");

        let mut request = self.http.get(&url).header(CACHE_CONTROL, "no-store");
        if let Some((name, value)) = &self.origin_header {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: ListingBody = response
            .json()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(body.images)
    }
}

#[derive(Deserialize)]
struct ListingBody {
    #[serde(default)]
    images: Vec<ImageDescriptor>,
}
