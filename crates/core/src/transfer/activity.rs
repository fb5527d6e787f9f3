//! Favorites, likes and watch history: per-user activity rows.
//!
//! These categories are created and deleted but never updated.

use chrono::{DateTime, FixedOffset};
use episodic_db::entities::{favorite, like, watch_history};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FavoriteCreate {
    #[serde(skip_deserializing)]
    pub user_id: i32,

    #[validate(range(min = 1))]
    pub work_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub id: i32,
    pub user_id: i32,
    pub work_id: i32,
    pub added_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LikeCreate {
    #[serde(skip_deserializing)]
    pub user_id: i32,

    #[validate(range(min = 1))]
    pub comment_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: i32,
    pub user_id: i32,
    pub comment_id: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WatchHistoryCreate {
    #[serde(skip_deserializing)]
    pub user_id: i32,

    #[validate(range(min = 1))]
    pub work_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchHistoryResponse {
    pub id: i32,
    pub user_id: i32,
    pub work_id: i32,
    pub watched_at: DateTime<FixedOffset>,
}

impl From<FavoriteCreate> for favorite::ActiveModel {
    fn from(input: FavoriteCreate) -> Self {
        Self {
            user_id: Set(input.user_id),
            work_id: Set(input.work_id),
            ..Default::default()
        }
    }
}

impl From<favorite::Model> for FavoriteResponse {
    fn from(model: favorite::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            work_id: model.work_id,
            added_at: model.added_at,
        }
    }
}

impl From<LikeCreate> for like::ActiveModel {
    fn from(input: LikeCreate) -> Self {
        Self {
            user_id: Set(input.user_id),
            comment_id: Set(input.comment_id),
            ..Default::default()
        }
    }
}

impl From<like::Model> for LikeResponse {
    fn from(model: like::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            comment_id: model.comment_id,
        }
    }
}

impl From<WatchHistoryCreate> for watch_history::ActiveModel {
    fn from(input: WatchHistoryCreate) -> Self {
        Self {
            user_id: Set(input.user_id),
            work_id: Set(input.work_id),
            ..Default::default()
        }
    }
}

impl From<watch_history::Model> for WatchHistoryResponse {
    fn from(model: watch_history::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            work_id: model.work_id,
            watched_at: model.watched_at,
        }
    }
}
