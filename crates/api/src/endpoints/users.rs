//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use episodic_common::AppResult;
use episodic_core::transfer::{UserCreate, UserResponse, UserUpdate};

use crate::{extractors::ListFilter, middleware::AppState, response::deleted};

/// Create a user.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<UserCreate>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.services.users.add(input).await?))
}

/// List users matching the query-string filters.
async fn list(
    State(state): State<AppState>,
    ListFilter(conditions): ListFilter,
) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(Json(state.services.users.list(&conditions).await?))
}

/// Get a user by id.
async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.services.users.get(id).await?))
}

/// Update the fields that were sent and differ from the stored ones.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UserUpdate>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(state.services.users.update(id, input).await?))
}

/// Delete a user. Deleting a missing user succeeds.
async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<StatusCode> {
    state.services.users.delete(id).await?;
    Ok(deleted())
}

/// Whether the username is already taken.
async fn username_duplicated(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.services.users.username_exists(&username).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(delete))
        .route(
            "/username_duplicated_check/{username}",
            get(username_duplicated),
        )
}
