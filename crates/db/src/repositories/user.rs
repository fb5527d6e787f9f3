//! User repository.

use episodic_common::AppResult;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use super::base::{Repository, db_error};
use crate::entities::{User, user};

/// Repository for [`user::Entity`].
pub type UserRepository = Repository<User>;

impl Repository<User> {
    /// Find the user whose username and password both match exactly.
    ///
    /// Passwords are stored and compared as plaintext.
    pub async fn find_by_credentials<C: ConnectionTrait>(
        &self,
        db: &C,
        username: &str,
        password: &str,
    ) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Password.eq(password))
            .one(db)
            .await
            .map_err(db_error)
    }

    /// Find the first user with the given username.
    pub async fn find_by_username<C: ConnectionTrait>(
        &self,
        db: &C,
        username: &str,
    ) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
            .map_err(db_error)
    }
}
