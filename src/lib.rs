//! # Gallery API
//!
//! A small personal image-gallery service: a backend that lists images
//! stored in S3, attaches a time-limited presigned URL to each, and proxies
//! a Twitter profile lookup; plus the browser-side gallery view controller
//! that paginates the listing client-side.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`storage`] - Object-store listing and presigned-URL generation
//! - [`profile`] - Twitter profile lookup via Secrets Manager credentials
//! - [`server`] - Axum-based HTTP server, request gate, and handlers
//! - [`gallery`] - The gallery view controller and its fetch client
//! - [`config`] - CLI and configuration types
//!
//! ## Request flow
//!
//! ```text
//! view controller ──GET /api/get-image-data──▶ gate ──▶ handler
//!                                               │          │
//!                    500 missing env / 403 ◀────┘          ▼
//!                                                   ListObjectsV2
//!                                                   + presign each
//!                                               ◀── { "images": [...] }
//! ```
//!
//! Access control is a shared-secret origin header checked by the gate on
//! every request; it is deliberately not a cryptographic scheme.

pub mod config;
pub mod error;
pub mod gallery;
pub mod profile;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{FetchError, ProfileError, StorageError};
pub use gallery::{GalleryClient, GalleryView, ItemDisplay, ViewState, ITEMS_PER_PAGE};
pub use profile::{ProfileSource, TwitterCredentials, TwitterProfileSource};
pub use server::{
    create_router, AppState, ErrorBody, GateError, HealthResponse, ListingResponse,
    ProfileResponse, RequestGate, RouterConfig,
};
pub use storage::{
    create_s3_client, ImageDescriptor, ImageStore, S3ImageStore, LISTING_PREFIX, PRESIGNED_URL_TTL,
};
