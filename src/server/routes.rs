//! Router configuration for the gallery API.
//!
//! # Route Structure
//!
//! ```text
//! /health                  - Health check (public)
//! /api/get-image-data      - Image listing (gated)
//! /api/get-twitter-data    - Profile proxy (gated)
//! anything else            - 404 (gated: a bad origin yields 403 first)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gallery_api::{create_router, AppState, Config, RouterConfig};
//!
//! let state = AppState::new(store, profile);
//! let router = create_router(state, Arc::new(config), RouterConfig::new());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::gate::{gate_middleware, RequestGate};
use super::handlers::{
    health_handler, list_images_handler, not_found_handler, profile_handler, AppState,
};
use crate::config::Config;
use crate::profile::ProfileSource;
use crate::storage::ImageStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone, Default)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default CORS allows any origin and tracing is enabled.
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// The gate middleware (environment validation, path check, origin header
/// check) wraps the API routes and the 404 fallback. The health endpoint
/// is registered after the gate layer and stays public.
pub fn create_router<S, P>(
    state: AppState<S, P>,
    config: Arc<Config>,
    router_config: RouterConfig,
) -> Router
where
    S: ImageStore + 'static,
    P: ProfileSource + 'static,
{
    let gate = RequestGate::new(config);
    let cors = build_cors_layer(&router_config);

    let router = Router::new()
        .route("/api/get-image-data", get(list_images_handler::<S, P>))
        .route("/api/get-twitter-data", get(profile_handler::<S, P>))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, gate_middleware))
        // Registered after the gate layer: public
        .route("/health", get(health_handler))
        .layer(cors);

    if router_config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    // Any headers: the origin gate header name is deployment-configured,
    // so it cannot be listed statically here.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            let parsed_origins: Vec<http::HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
