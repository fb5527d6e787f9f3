//! Repositories.
//!
//! One generic [`Repository`] per entity. Repositories are stateless; the
//! connection (normally a session's transaction) is passed to each call.

pub mod base;
pub mod filter;
pub mod user;

pub use base::{Keyed, Repository, column_named, not_found_message};
pub use filter::{Condition, FieldKind, Operator, RawCondition};
pub use user::UserRepository;

use crate::entities::{Comment, Episode, Favorite, Like, Notice, WatchHistory, Work};

/// Repository for works.
pub type WorkRepository = Repository<Work>;
/// Repository for episodes.
pub type EpisodeRepository = Repository<Episode>;
/// Repository for notices.
pub type NoticeRepository = Repository<Notice>;
/// Repository for comments.
pub type CommentRepository = Repository<Comment>;
/// Repository for favorites.
pub type FavoriteRepository = Repository<Favorite>;
/// Repository for likes.
pub type LikeRepository = Repository<Like>;
/// Repository for watch history entries.
pub type WatchHistoryRepository = Repository<WatchHistory>;

/// One repository per entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Repositories {
    pub users: UserRepository,
    pub works: WorkRepository,
    pub episodes: EpisodeRepository,
    pub notices: NoticeRepository,
    pub comments: CommentRepository,
    pub favorites: FavoriteRepository,
    pub likes: LikeRepository,
    pub watch_history: WatchHistoryRepository,
}
