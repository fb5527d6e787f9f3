//! Authentication endpoints.

use axum::{Json, Router, extract::State, response::Response, routing::post};
use episodic_common::{AppError, AppResult};
use episodic_core::transfer::Credentials;

use crate::{middleware::AppState, response::login_success};

/// Log in with username and password.
///
/// On success the access token is returned in the `Authorization` header.
async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Response> {
    let user = state
        .services
        .auth
        .login(&credentials)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = state.services.auth.issue_token(&user)?;
    login_success(&token)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
