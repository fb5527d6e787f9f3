//! User service.

use episodic_common::AppResult;
use episodic_db::entities::user;
use tracing::debug;

use super::crud::Crud;
use crate::convert::to_transfer;
use crate::transfer::{UserCreate, UserResponse, UserUpdate};

/// CRUD over users, plus username lookups.
pub type UserService = Crud<user::Entity, UserCreate, UserResponse, UserUpdate>;

impl UserService {
    /// The first user with the given username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<UserResponse>> {
        let uow = self.begin().await?;
        let result = match uow.conn() {
            Ok(conn) => uow
                .repositories()
                .users
                .find_by_username(conn, username)
                .await
                .map(to_transfer),
            Err(e) => Err(e),
        };
        uow.close().await;
        result
    }

    /// Whether any user already has this username.
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists = self.find_by_username(username).await?.is_some();
        debug!(username, exists, "Checked username");
        Ok(exists)
    }
}
