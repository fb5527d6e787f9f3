//! Episode endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use episodic_common::AppResult;
use episodic_core::transfer::{EpisodeCreate, EpisodeResponse, EpisodeUpdate};

use super::ensure_work_owner;
use crate::{
    extractors::{AuthUser, ListFilter},
    middleware::AppState,
    response::deleted,
};

/// List episodes matching the query-string filters, e.g. `?work_id=3`.
async fn list(
    State(state): State<AppState>,
    ListFilter(conditions): ListFilter,
) -> AppResult<Json<Vec<EpisodeResponse>>> {
    Ok(Json(state.services.episodes.list(&conditions).await?))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EpisodeResponse>> {
    Ok(Json(state.services.episodes.get(id).await?))
}

/// Post an episode on a work the caller owns.
async fn create(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<EpisodeCreate>,
) -> AppResult<Json<EpisodeResponse>> {
    ensure_work_owner(&state.services, input.work_id, &caller).await?;
    Ok(Json(state.services.episodes.add(input).await?))
}

async fn update(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<EpisodeUpdate>,
) -> AppResult<Json<EpisodeResponse>> {
    let current = state.services.episodes.get(id).await?;
    ensure_work_owner(&state.services, current.work_id, &caller).await?;

    Ok(Json(state.services.episodes.update(id, input).await?))
}

async fn delete(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if let Some(current) = state.services.episodes.find(id).await? {
        ensure_work_owner(&state.services, current.work_id, &caller).await?;
        state.services.episodes.delete(id).await?;
    }
    Ok(deleted())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(delete))
}
