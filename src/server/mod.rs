//! HTTP server layer for the gallery API.
//!
//! This module contains the Axum routes, the request gate middleware
//! (environment validation + shared-secret origin header check), and the
//! request handlers.

pub mod gate;
pub mod handlers;
pub mod routes;

pub use gate::{gate_middleware, GateError, RequestGate};
pub use handlers::{
    health_handler, list_images_handler, not_found_handler, profile_handler, AppState, ErrorBody,
    HealthResponse, ListingError, ListingResponse, ProfileFetchError, ProfileResponse,
};
pub use routes::{create_router, RouterConfig};
