//! HTTP API layer for episodic.
//!
//! This crate provides the REST API under `/api/v1`:
//!
//! - **Endpoints**: users, works, episodes, notices, comments and activity
//! - **Extractors**: authenticated caller and query-string search filters
//! - **Middleware**: bearer token authentication
//!
//! Built on Axum 0.8.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

use axum::{Router, middleware::from_fn_with_state};

pub use endpoints::router;
pub use middleware::AppState;

/// Path prefix every endpoint is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Build the application: the API router with authentication applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX, router())
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .with_state(state)
}
