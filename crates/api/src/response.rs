//! API response helpers.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use episodic_common::{AppError, AppResult};
use serde_json::json;

/// Response for a successful delete.
#[must_use]
pub const fn deleted() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Response for a successful login: the token travels in the
/// `Authorization` header, the body only confirms.
pub fn login_success(token: &str) -> AppResult<Response> {
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| AppError::Internal(format!("token is not a valid header value: {e}")))?;

    Ok((
        [(header::AUTHORIZATION, value)],
        Json(json!({ "message": "Login successful" })),
    )
        .into_response())
}
