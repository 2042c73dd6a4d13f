//! Request gate for the gallery API.
//!
//! Every API request passes three checks, in order, before reaching a
//! handler:
//!
//! 1. **Environment**: all required configuration values are present;
//!    otherwise 500 with the exact list of missing names.
//! 2. **Request shape**: the request carries a path; otherwise 400.
//! 3. **Origin**: the configured origin header matches the configured value
//!    exactly; otherwise 403 with a generic body that does not reveal which
//!    check failed.
//!
//! The origin header is a shared secret between the deployed front-end and
//! this backend, not a cryptographic authentication scheme. The environment
//! check runs on every invocation rather than once at startup, so a
//! misconfigured deployment reports itself instead of crashing.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::config::Config;

// =============================================================================
// Types
// =============================================================================

/// Gate rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Required configuration values are unset
    MissingEnv(Vec<&'static str>),

    /// The request carries no path
    NoPath,

    /// Origin header absent or mismatched
    Forbidden,
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        match self {
            GateError::MissingEnv(missing) => {
                error!(?missing, "Missing environment variables");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "missing": missing })),
                )
                    .into_response()
            }
            GateError::NoPath => {
                warn!("No path provided on the request");

                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No path provided on the event" })),
                )
                    .into_response()
            }
            GateError::Forbidden => {
                // Generic body on purpose; do not reveal which check failed
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Forbidden" })),
                )
                    .into_response()
            }
        }
    }
}

// =============================================================================
// Gate State & Middleware
// =============================================================================

/// State for the gate middleware: the process-wide immutable configuration.
#[derive(Clone)]
pub struct RequestGate {
    config: Arc<Config>,
}

impl RequestGate {
    /// Create a gate over the given configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Run the three checks against one request.
    pub fn check(&self, request: &Request) -> Result<(), GateError> {
        let missing = self.config.missing_required();
        if !missing.is_empty() {
            return Err(GateError::MissingEnv(missing));
        }

        if request.uri().path().is_empty() {
            return Err(GateError::NoPath);
        }

        // missing_required() guarantees both values are set past this point
        let Some((header_name, expected)) = self.config.origin_gate() else {
            return Err(GateError::MissingEnv(self.config.missing_required()));
        };

        let provided = request
            .headers()
            .get(header_name)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(value) if value == expected => Ok(()),
            provided => {
                warn!(
                    has_header = provided.is_some(),
                    path = request.uri().path(),
                    "Forbidden - missing or invalid origin header"
                );
                Err(GateError::Forbidden)
            }
        }
    }
}

/// Axum middleware applying the gate to every request that reaches it.
///
/// Applied to the API routes and the 404 fallback; the health endpoint is
/// registered outside the gate.
pub async fn gate_middleware(
    State(gate): State<RequestGate>,
    request: Request,
    next: Next,
) -> Result<Response, GateError> {
    gate.check(&request)?;
    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
