use chrono::{DateTime, FixedOffset};
use episodic_db::entities::work;
use sea_orm::{Set, Value};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{PartialUpdate, push_set};

/// Input for creating a work.
///
/// The owner is never read from a request body; it is filled in from the
/// authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkCreate {
    #[serde(skip_deserializing)]
    pub user_id: i32,

    #[validate(length(min = 1, max = 256))]
    pub title: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

/// Partial work update.
///
/// `description` declares `""` as its default, so setting it to the empty
/// string is ignored by the diffing update rather than clearing it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WorkUpdate {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    pub description: Option<String>,
}

impl From<WorkCreate> for work::ActiveModel {
    fn from(input: WorkCreate) -> Self {
        Self {
            user_id: Set(input.user_id),
            title: Set(input.title),
            description: Set(input.description),
            ..Default::default()
        }
    }
}

impl From<work::Model> for WorkResponse {
    fn from(model: work::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

impl PartialUpdate for WorkUpdate {
    type Entity = work::Entity;

    fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut changes = Vec::new();
        push_set(&mut changes, "title", &self.title);
        push_set(&mut changes, "description", &self.description);
        changes
    }

    fn declared_default(field: &str) -> Option<Value> {
        match field {
            "description" => Some(Value::from(String::new())),
            _ => None,
        }
    }
}
