use async_trait::async_trait;
use aws_sdk_secretsmanager::Client as SecretsClient;
use http::header::AUTHORIZATION;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{oauth, ProfileSource};
use crate::error::ProfileError;

/// Twitter API v2 endpoint for the authenticated user's profile.
const USERS_ME_URL: &str = "https://api.twitter.com/2/users/me";

// =============================================================================
// Credentials
// =============================================================================

/// OAuth 1.0a user credentials, as stored in the Secrets Manager secret.
///
/// The secret is a JSON object with the keys `API_KEY`, `API_SECRET`,
/// `ACCESS_TOKEN` and `ACCESS_TOKEN_SECRET`.
#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

#[derive(Deserialize)]
struct RawSecret {
    #[serde(rename = "API_KEY", default)]
    api_key: String,
    #[serde(rename = "API_SECRET", default)]
    api_secret: String,
    #[serde(rename = "ACCESS_TOKEN", default)]
    access_token: String,
    #[serde(rename = "ACCESS_TOKEN_SECRET", default)]
    access_token_secret: String,
}

impl TwitterCredentials {
    /// Parse credentials from the secret's JSON string.
    ///
    /// A field that is absent or empty makes the whole secret invalid;
    /// partial credentials are never used.
    pub fn from_secret_json(secret: &str) -> Result<Self, ProfileError> {
        let raw: RawSecret =
            serde_json::from_str(secret).map_err(|e| ProfileError::Secret(e.to_string()))?;

        if raw.api_key.is_empty()
            || raw.api_secret.is_empty()
            || raw.access_token.is_empty()
            || raw.access_token_secret.is_empty()
        {
            return Err(ProfileError::IncompleteCredentials);
        }

        Ok(Self {
            api_key: raw.api_key,
            api_secret: raw.api_secret,
            access_token: raw.access_token,
            access_token_secret: raw.access_token_secret,
        })
    }

    fn token(&self) -> oauth::Token<'_> {
        oauth::Token {
            consumer_key: &self.api_key,
            consumer_secret: &self.api_secret,
            access_token: &self.access_token,
            access_token_secret: &self.access_token_secret,
        }
    }
}

// =============================================================================
// Twitter Client
// =============================================================================

/// An initialized Twitter API client: credentials plus an HTTP client.
struct TwitterClient {
    credentials: TwitterCredentials,
    http: reqwest::Client,
}

impl TwitterClient {
    /// Fetch the authenticated user's profile with public metrics.
    async fn me(&self) -> Result<serde_json::Value, ProfileError> {
        let query = [("user.fields", "public_metrics")];
        let auth = oauth::authorization_header("GET", USERS_ME_URL, self.credentials.token(), &query);

        let response = self
            .http
            .get(USERS_ME_URL)
            .query(&query)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| ProfileError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProfileError::Api(format!(
                "Twitter API returned {}",
                status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProfileError::Api(e.to_string()))?;

        // v2 responses wrap the user object in a "data" field
        body.get("data")
            .cloned()
            .ok_or_else(|| ProfileError::Api("Twitter API response missing data".to_string()))
    }
}

// =============================================================================
// Profile Source
// =============================================================================

/// [`ProfileSource`] backed by Secrets Manager and the Twitter API.
///
/// The Twitter client is built at most once per process, on first use. A
/// failed build leaves the cell empty so the next request re-attempts;
/// after a secret rotation a process restart picks up the new credentials.
pub struct TwitterProfileSource {
    secrets: SecretsClient,
    secret_id: Option<String>,
    http: reqwest::Client,
    client: OnceCell<TwitterClient>,
}

impl TwitterProfileSource {
    /// Create a new profile source.
    ///
    /// `secret_id` may be `None` when the deployment has no Twitter
    /// integration; every profile request then fails with a configuration
    /// error while the rest of the service keeps working.
    pub fn new(secrets: SecretsClient, secret_id: Option<String>) -> Self {
        Self {
            secrets,
            secret_id,
            http: reqwest::Client::new(),
            client: OnceCell::new(),
        }
    }

    async fn init_client(&self) -> Result<TwitterClient, ProfileError> {
        let secret_id = self
            .secret_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ProfileError::SecretNotConfigured)?;

        debug!("Retrieving Twitter credentials from Secrets Manager");

        let response = self
            .secrets
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| ProfileError::Secret(e.to_string()))?;

        let secret_string = response
            .secret_string()
            .ok_or_else(|| ProfileError::Secret("secret has no string value".to_string()))?;

        let credentials = TwitterCredentials::from_secret_json(secret_string)?;

        info!("Twitter client initialized");

        Ok(TwitterClient {
            credentials,
            http: self.http.clone(),
        })
    }
}

#[async_trait]
impl ProfileSource for TwitterProfileSource {
    async fn profile(&self) -> Result<serde_json::Value, ProfileError> {
        let client = self
            .client
            .get_or_try_init(|| self.init_client())
            .await?;

        client.me().await
    }
}

/// Create a Secrets Manager client for the given region.
pub async fn create_secrets_client(region: &str) -> SecretsClient {
    let region = aws_config::Region::new(region.to_string());
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(region)
        .load()
        .await;

    SecretsClient::new(&sdk_config)
}

// =============================================================================
// Tests
// =============================================================================
