//! Work endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use episodic_common::AppResult;
use episodic_core::transfer::{WorkCreate, WorkResponse, WorkUpdate};

use super::ensure_owner;
use crate::{
    extractors::{AuthUser, ListFilter},
    middleware::AppState,
    response::deleted,
};

/// List works matching the query-string filters.
async fn list(
    State(state): State<AppState>,
    ListFilter(conditions): ListFilter,
) -> AppResult<Json<Vec<WorkResponse>>> {
    Ok(Json(state.services.works.list(&conditions).await?))
}

/// Works of one user, oldest first.
async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<WorkResponse>>> {
    Ok(Json(state.services.works.list_by_user(user_id).await?))
}

/// Create a work owned by the caller.
async fn create(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<WorkCreate>,
) -> AppResult<Json<WorkResponse>> {
    // The token may outlive its user
    let author = state.services.users.get(caller.id).await?;

    let input = WorkCreate {
        user_id: author.id,
        ..input
    };
    Ok(Json(state.services.works.add(input).await?))
}

async fn update(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<WorkUpdate>,
) -> AppResult<Json<WorkResponse>> {
    let work = state.services.works.get(id).await?;
    ensure_owner(work.user_id, &caller, "work")?;

    Ok(Json(state.services.works.update(id, input).await?))
}

async fn delete(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if let Some(work) = state.services.works.find(id).await? {
        ensure_owner(work.user_id, &caller, "work")?;
        state.services.works.delete(id).await?;
    }
    Ok(deleted())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", put(update).delete(delete).get(list_by_user))
}
