use chrono::{DateTime, FixedOffset};
use episodic_db::entities::comment;
use sea_orm::{Set, Value};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{PartialUpdate, push_set};

/// Input for creating a comment on exactly one episode or notice.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_single_parent"))]
pub struct CommentCreate {
    #[serde(skip_deserializing)]
    pub user_id: i32,

    pub episode_id: Option<i32>,

    pub notice_id: Option<i32>,

    #[validate(length(min = 1, max = 4096))]
    pub content: String,
}

fn validate_single_parent(input: &CommentCreate) -> Result<(), ValidationError> {
    match (input.episode_id, input.notice_id) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        _ => Err(ValidationError::new("single_parent")
            .with_message("exactly one of episode_id or notice_id must be set".into())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub user_id: i32,
    pub episode_id: Option<i32>,
    pub notice_id: Option<i32>,
    pub content: String,
    pub created_at: DateTime<FixedOffset>,
}

/// Partial comment update. Only the text can change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentUpdate {
    #[validate(length(min = 1, max = 4096))]
    pub content: Option<String>,
}

impl From<CommentCreate> for comment::ActiveModel {
    fn from(input: CommentCreate) -> Self {
        Self {
            user_id: Set(input.user_id),
            episode_id: Set(input.episode_id),
            notice_id: Set(input.notice_id),
            content: Set(input.content),
            ..Default::default()
        }
    }
}

impl From<comment::Model> for CommentResponse {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            episode_id: model.episode_id,
            notice_id: model.notice_id,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

impl PartialUpdate for CommentUpdate {
    type Entity = comment::Entity;

    fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut changes = Vec::new();
        push_set(&mut changes, "content", &self.content);
        changes
    }
}
