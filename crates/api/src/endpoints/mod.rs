//! API endpoints.

mod auth;
mod comments;
mod episodes;
mod favorites;
mod history;
mod likes;
mod notices;
mod users;
mod works;

use axum::Router;
use episodic_common::{AppError, AppResult};
use episodic_core::{Claims, Services};

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/works", works::router())
        .nest("/episodes", episodes::router())
        .nest("/notices", notices::router())
        .nest("/comments", comments::router())
        .nest("/likes", likes::router())
        .nest("/favorites", favorites::router())
        .nest("/history", history::router())
}

/// Fail with `Forbidden` unless the caller owns the row.
fn ensure_owner(owner_id: i32, caller: &Claims, what: &str) -> AppResult<()> {
    if owner_id == caller.id {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("not the owner of this {what}")))
    }
}

/// Fail unless the work exists and belongs to the caller.
async fn ensure_work_owner(services: &Services, work_id: i32, caller: &Claims) -> AppResult<()> {
    let work = services.works.get(work_id).await?;
    ensure_owner(work.user_id, caller, "work")
}
