//! Comment endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use episodic_common::AppResult;
use episodic_core::transfer::{CommentCreate, CommentResponse, CommentUpdate};
use validator::Validate;

use super::ensure_owner;
use crate::{
    extractors::{AuthUser, ListFilter},
    middleware::AppState,
    response::deleted,
};

/// List comments matching the query-string filters, e.g. `?episode_id=2`.
async fn list(
    State(state): State<AppState>,
    ListFilter(conditions): ListFilter,
) -> AppResult<Json<Vec<CommentResponse>>> {
    Ok(Json(state.services.comments.list(&conditions).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CommentResponse>> {
    Ok(Json(state.services.comments.get(id).await?))
}

/// Comment on an episode or a notice as the caller.
async fn create(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CommentCreate>,
) -> AppResult<Json<CommentResponse>> {
    input.validate()?;

    if let Some(episode_id) = input.episode_id {
        state.services.episodes.get(episode_id).await?;
    }
    if let Some(notice_id) = input.notice_id {
        state.services.notices.get(notice_id).await?;
    }

    let input = CommentCreate {
        user_id: caller.id,
        ..input
    };
    Ok(Json(state.services.comments.add(input).await?))
}

async fn update(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CommentUpdate>,
) -> AppResult<Json<CommentResponse>> {
    let comment = state.services.comments.get(id).await?;
    ensure_owner(comment.user_id, &caller, "comment")?;

    Ok(Json(state.services.comments.update(id, input).await?))
}

async fn delete(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if let Some(comment) = state.services.comments.find(id).await? {
        ensure_owner(comment.user_id, &caller, "comment")?;
        state.services.comments.delete(id).await?;
    }
    Ok(deleted())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(delete))
}
