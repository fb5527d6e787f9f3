//! API middleware.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use episodic_core::Services;
use tracing::debug;

/// Application state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Every service, keyed by entity category.
    pub services: Services,
}

impl AppState {
    /// Create the application state.
    #[must_use]
    pub const fn new(services: Services) -> Self {
        Self { services }
    }
}

/// The token of an `Authorization: Bearer <token>` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Authentication middleware.
///
/// A valid bearer token puts its [`episodic_core::Claims`] into the request
/// extensions. Anything else leaves the request anonymous; routes that need
/// a caller reject it through the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let claims = bearer_token(req.headers()).and_then(|token| {
        let claims = state.services.auth.verify_token(token);
        if claims.is_none() {
            debug!("Ignoring invalid bearer token");
        }
        claims
    });

    if let Some(claims) = claims {
        req.extensions_mut().insert(claims);
    }

    next.run(req).await
}
