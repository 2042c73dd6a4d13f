use thiserror::Error;

/// Errors from the object-storage backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Listing the bucket failed
    #[error("S3 error: {0}")]
    List(String),

    /// Generating a presigned URL failed
    #[error("Failed to generate presigned URL: {0}")]
    Presign(String),
}

/// Errors from the Twitter profile lookup.
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// No secret identifier was configured for the process
    #[error("TWITTER_SECRET_ARN not set")]
    SecretNotConfigured,

    /// Retrieving or parsing the secret failed
    #[error("{0}")]
    Secret(String),

    /// The secret was retrieved but one or more credential fields are empty
    #[error("Missing required Twitter credentials in secret")]
    IncompleteCredentials,

    /// The Twitter API call failed or returned an unexpected shape
    #[error("{0}")]
    Api(String),
}

/// Errors from the gallery's listing fetch.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The backend answered with a non-2xx status
    #[error("fetch failed {status}")]
    Status { status: u16 },

    /// The request never completed (connection, DNS, decode)
    #[error("{0}")]
    Transport(String),
}
