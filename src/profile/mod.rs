//! Twitter profile lookup.
//!
//! The profile endpoint proxies a single Twitter API v2 call
//! (`GET /2/users/me?user.fields=public_metrics`) using OAuth 1.0a user
//! credentials stored in AWS Secrets Manager.
//!
//! Credentials are fetched lazily and the constructed client is cached for
//! the lifetime of the process behind a [`tokio::sync::OnceCell`]: a failed
//! initialization leaves the cell empty, so the next request re-attempts
//! instead of serving a dead client, and concurrent first use is serialized
//! by the cell.

use async_trait::async_trait;

use crate::error::ProfileError;

pub mod oauth;

mod twitter;

pub use twitter::{create_secrets_client, TwitterCredentials, TwitterProfileSource};

/// Source of third-party profile data.
///
/// A trait seam so the HTTP handlers can be tested without Secrets Manager
/// or the Twitter API.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile object for the configured account.
    async fn profile(&self) -> Result<serde_json::Value, ProfileError>;
}
