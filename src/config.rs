//! Configuration management for the gallery API.
//!
//! Configuration is read from command-line arguments with environment
//! variable fallbacks. The request-scoped values keep the environment
//! variable names of the original deployment (`IMAGE_BUCKET_NAME`,
//! `ORIGIN_HEADER_NAME`, `ORIGIN_HEADER_VALUE`, `TWITTER_SECRET_ARN`);
//! server and S3 knobs use a `GALLERY_` prefix.
//!
//! Required values are intentionally *optional* at parse time: the server
//! starts without them, and the request gate re-checks their presence on
//! every invocation so a misconfigured deployment answers 500 with the
//! exact list of missing names instead of crashing at startup.
//!
//! # Environment Variables
//!
//! - `GALLERY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GALLERY_PORT` - Server port (default: 3000)
//! - `IMAGE_BUCKET_NAME` - S3 bucket holding the gallery images
//! - `ORIGIN_HEADER_NAME` - Name of the shared-secret origin header
//! - `ORIGIN_HEADER_VALUE` - Expected value of the origin header
//! - `TWITTER_SECRET_ARN` - Secrets Manager id for Twitter credentials
//! - `GALLERY_S3_ENDPOINT` - Custom S3 endpoint for S3-compatible services
//! - `GALLERY_S3_REGION` - AWS region (default: us-east-1)
//! - `GALLERY_CORS_ORIGINS` - Allowed CORS origins (comma-separated)

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment variable naming the image bucket.
pub const ENV_BUCKET: &str = "IMAGE_BUCKET_NAME";

/// Environment variable naming the origin header.
pub const ENV_ORIGIN_HEADER_NAME: &str = "ORIGIN_HEADER_NAME";

/// Environment variable holding the expected origin header value.
pub const ENV_ORIGIN_HEADER_VALUE: &str = "ORIGIN_HEADER_VALUE";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Gallery API - image listing and profile proxy server.
///
/// Lists images stored in an S3 bucket, attaches a time-limited presigned
/// URL to each, and proxies a Twitter profile lookup. Access is gated by a
/// shared-secret origin header.
#[derive(Parser, Debug, Clone)]
#[command(name = "gallery-api")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GALLERY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GALLERY_PORT")]
    pub port: u16,

    // =========================================================================
    // S3 Configuration
    // =========================================================================
    /// S3 bucket containing the gallery images.
    ///
    /// Required at request time; requests answer 500 while it is unset.
    #[arg(long, env = ENV_BUCKET)]
    pub bucket: Option<String>,

    /// Custom S3 endpoint URL for S3-compatible services (MinIO, etc.).
    ///
    /// If not specified, uses the default AWS S3 endpoint.
    #[arg(long, env = "GALLERY_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS region for S3 and Secrets Manager.
    #[arg(long, default_value = DEFAULT_REGION, env = "GALLERY_S3_REGION")]
    pub s3_region: String,

    // =========================================================================
    // Origin Gate Configuration
    // =========================================================================
    /// Name of the shared-secret origin header.
    #[arg(long, env = ENV_ORIGIN_HEADER_NAME)]
    pub origin_header_name: Option<String>,

    /// Expected value of the origin header (exact string match).
    #[arg(long, env = ENV_ORIGIN_HEADER_VALUE)]
    pub origin_header_value: Option<String>,

    // =========================================================================
    // Twitter Configuration
    // =========================================================================
    /// Secrets Manager identifier holding the Twitter API credentials.
    ///
    /// When unset, the profile endpoint answers 500; the listing endpoint
    /// is unaffected.
    #[arg(long, env = "TWITTER_SECRET_ARN")]
    pub twitter_secret_arn: Option<String>,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GALLERY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Names of required request-time values that are unset or empty.
    ///
    /// The request gate calls this on every invocation and answers 500
    /// with the returned names. An empty string counts as missing, matching
    /// the behavior of an unset environment variable.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if is_unset(&self.bucket) {
            missing.push(ENV_BUCKET);
        }
        if is_unset(&self.origin_header_name) {
            missing.push(ENV_ORIGIN_HEADER_NAME);
        }
        if is_unset(&self.origin_header_value) {
            missing.push(ENV_ORIGIN_HEADER_VALUE);
        }

        missing
    }

    /// The origin header name and expected value, if both are configured.
    pub fn origin_gate(&self) -> Option<(&str, &str)> {
        match (
            self.origin_header_name.as_deref(),
            self.origin_header_value.as_deref(),
        ) {
            (Some(name), Some(value)) if !name.is_empty() && !value.is_empty() => {
                Some((name, value))
            }
            _ => None,
        }
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_unset(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

// =============================================================================
// Tests
// =============================================================================
