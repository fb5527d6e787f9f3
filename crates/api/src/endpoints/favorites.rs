//! Favorite endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use episodic_common::AppResult;
use episodic_core::transfer::{FavoriteCreate, FavoriteResponse};

use super::ensure_owner;
use crate::{
    extractors::{AuthUser, ListFilter},
    middleware::AppState,
    response::deleted,
};

async fn list(
    State(state): State<AppState>,
    ListFilter(conditions): ListFilter,
) -> AppResult<Json<Vec<FavoriteResponse>>> {
    Ok(Json(state.services.favorites.list(&conditions).await?))
}

/// Add a work to the caller's favorites.
async fn create(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<FavoriteCreate>,
) -> AppResult<Json<FavoriteResponse>> {
    state.services.works.get(input.work_id).await?;

    let input = FavoriteCreate {
        user_id: caller.id,
        ..input
    };
    Ok(Json(state.services.favorites.add(input).await?))
}

async fn remove(
    AuthUser(caller): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if let Some(favorite) = state.services.favorites.find(id).await? {
        ensure_owner(favorite.user_id, &caller, "favorite")?;
        state.services.favorites.delete(id).await?;
    }
    Ok(deleted())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", delete(remove))
}
