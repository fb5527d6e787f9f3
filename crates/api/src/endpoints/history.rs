//! Watch history endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use episodic_common::AppResult;
use episodic_core::transfer::{WatchHistoryCreate, WatchHistoryResponse};
use episodic_db::repositories::RawCondition;
use serde_json::json;

use super::ensure_owner;
use crate::{
    extractors::{AuthUser, ListFilter},
    middleware::AppState,
    response::deleted,
};

/// The caller's own history, further narrowed by the query-string filters.
async fn list(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    ListFilter(mut conditions): ListFilter,
) -> AppResult<Json<Vec<WatchHistoryResponse>>> {
    conditions.push(RawCondition::new("user_id", "eq", json!(caller.id)));
    Ok(Json(state.services.watch_history.list(&conditions).await?))
}

/// Record that the caller watched a work.
async fn create(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<WatchHistoryCreate>,
) -> AppResult<Json<WatchHistoryResponse>> {
    state.services.works.get(input.work_id).await?;

    let input = WatchHistoryCreate {
        user_id: caller.id,
        ..input
    };
    Ok(Json(state.services.watch_history.add(input).await?))
}

async fn remove(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if let Some(entry) = state.services.watch_history.find(id).await? {
        ensure_owner(entry.user_id, &caller, "history entry")?;
        state.services.watch_history.delete(id).await?;
    }
    Ok(deleted())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", delete(remove))
}
