use chrono::{DateTime, FixedOffset};
use episodic_db::entities::user;
use sea_orm::{Set, Value};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{PartialUpdate, push_set};

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Login credentials.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// A user as returned to callers. The password is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<FixedOffset>,
}

/// Partial user update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 128))]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 256))]
    pub password: Option<String>,
}

impl From<UserCreate> for user::ActiveModel {
    fn from(input: UserCreate) -> Self {
        Self {
            username: Set(input.username),
            password: Set(input.password),
            ..Default::default()
        }
    }
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

impl PartialUpdate for UserUpdate {
    type Entity = user::Entity;

    fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut changes = Vec::new();
        push_set(&mut changes, "username", &self.username);
        push_set(&mut changes, "password", &self.password);
        changes
    }
}
