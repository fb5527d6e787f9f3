//! Work service.

use episodic_common::{AppError, AppResult};
use episodic_db::{
    entities::{User, work},
    repositories::{Condition, not_found_message},
};

use super::crud::Crud;
use crate::transfer::{WorkCreate, WorkResponse, WorkUpdate};

/// CRUD over works, plus listing by author.
pub type WorkService = Crud<work::Entity, WorkCreate, WorkResponse, WorkUpdate>;

impl WorkService {
    /// Works of one user in insertion order. The user must exist.
    pub async fn list_by_user(&self, user_id: i32) -> AppResult<Vec<WorkResponse>> {
        let mut uow = self.begin().await?;
        let author = match uow.conn() {
            Ok(conn) => uow.repositories().users.get_by_id(conn, user_id).await,
            Err(e) => Err(e),
        };

        let result = match author {
            Ok(Some(_)) => {
                uow.list_models::<work::Entity, WorkResponse>(&[Condition::eq(
                    work::Column::UserId,
                    user_id,
                )])
                .await
            }
            Ok(None) => Err(AppError::NotFound(not_found_message::<User>(user_id))),
            Err(e) => Err(e),
        };

        uow.close().await;
        result
    }
}
