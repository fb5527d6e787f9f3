//! Transfer objects.
//!
//! For each entity category: a `*Create` input validated before it is
//! persisted, a `*Response` returned to callers, and, where the category
//! supports it, a `*Update` carrying only the fields a caller set.

#![allow(missing_docs)]

mod activity;
mod comment;
mod content;
mod user;
mod work;

pub use activity::{
    FavoriteCreate, FavoriteResponse, LikeCreate, LikeResponse, WatchHistoryCreate,
    WatchHistoryResponse,
};
pub use comment::{CommentCreate, CommentResponse, CommentUpdate};
pub use content::{
    EpisodeCreate, EpisodeResponse, EpisodeUpdate, NoticeCreate, NoticeResponse, NoticeUpdate,
};
pub use user::{Credentials, UserCreate, UserResponse, UserUpdate};
pub use work::{WorkCreate, WorkResponse, WorkUpdate};

use episodic_db::repositories::Keyed;
use sea_orm::Value;

/// An update input that knows which of its fields were set.
pub trait PartialUpdate {
    /// The entity the update applies to.
    type Entity: Keyed;

    /// The explicitly-set fields as `(column name, value)` pairs.
    fn changes(&self) -> Vec<(&'static str, Value)>;

    /// The declared default of `field` in the update schema, if it has one
    /// other than "unset".
    ///
    /// A change equal to its field's declared default is treated as if the
    /// field had not been set at all.
    fn declared_default(_field: &str) -> Option<Value> {
        None
    }
}

/// Push `(name, value)` when the field was set.
pub(crate) fn push_set<T>(
    changes: &mut Vec<(&'static str, Value)>,
    name: &'static str,
    field: &Option<T>,
) where
    T: Clone + Into<Value>,
{
    if let Some(value) = field {
        changes.push((name, value.clone().into()));
    }
}
