//! Like endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use episodic_common::AppResult;
use episodic_core::transfer::{LikeCreate, LikeResponse};

use super::ensure_owner;
use crate::{
    extractors::{AuthUser, ListFilter},
    middleware::AppState,
    response::deleted,
};

async fn list(
    State(state): State<AppState>,
    ListFilter(conditions): ListFilter,
) -> AppResult<Json<Vec<LikeResponse>>> {
    Ok(Json(state.services.likes.list(&conditions).await?))
}

/// Like a comment as the caller.
async fn create(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<LikeCreate>,
) -> AppResult<Json<LikeResponse>> {
    state.services.comments.get(input.comment_id).await?;

    let input = LikeCreate {
        user_id: caller.id,
        ..input
    };
    Ok(Json(state.services.likes.add(input).await?))
}

async fn remove(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if let Some(like) = state.services.likes.find(id).await? {
        ensure_owner(like.user_id, &caller, "like")?;
        state.services.likes.delete(id).await?;
    }
    Ok(deleted())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", delete(remove))
}
