//! Episodes and notices: titled content posted on a work.

use chrono::{DateTime, FixedOffset};
use episodic_db::entities::{episode, notice};
use sea_orm::{Set, Value};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{PartialUpdate, push_set};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EpisodeCreate {
    #[validate(range(min = 1))]
    pub work_id: i32,

    #[validate(length(min = 1, max = 256))]
    pub title: String,

    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeResponse {
    pub id: i32,
    pub work_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EpisodeUpdate {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NoticeCreate {
    #[validate(range(min = 1))]
    pub work_id: i32,

    #[validate(length(min = 1, max = 256))]
    pub title: String,

    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeResponse {
    pub id: i32,
    pub work_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NoticeUpdate {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    pub content: Option<String>,
}

impl From<EpisodeCreate> for episode::ActiveModel {
    fn from(input: EpisodeCreate) -> Self {
        Self {
            work_id: Set(input.work_id),
            title: Set(input.title),
            content: Set(input.content),
            ..Default::default()
        }
    }
}

impl From<episode::Model> for EpisodeResponse {
    fn from(model: episode::Model) -> Self {
        Self {
            id: model.id,
            work_id: model.work_id,
            title: model.title,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

impl PartialUpdate for EpisodeUpdate {
    type Entity = episode::Entity;

    fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut changes = Vec::new();
        push_set(&mut changes, "title", &self.title);
        push_set(&mut changes, "content", &self.content);
        changes
    }
}

impl From<NoticeCreate> for notice::ActiveModel {
    fn from(input: NoticeCreate) -> Self {
        Self {
            work_id: Set(input.work_id),
            title: Set(input.title),
            content: Set(input.content),
            ..Default::default()
        }
    }
}

impl From<notice::Model> for NoticeResponse {
    fn from(model: notice::Model) -> Self {
        Self {
            id: model.id,
            work_id: model.work_id,
            title: model.title,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

impl PartialUpdate for NoticeUpdate {
    type Entity = notice::Entity;

    fn changes(&self) -> Vec<(&'static str, Value)> {
        let mut changes = Vec::new();
        push_set(&mut changes, "title", &self.title);
        push_set(&mut changes, "content", &self.content);
        changes
    }
}
