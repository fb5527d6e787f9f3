//! Business logic services.
//!
//! [`Services`] is the lookup table from entity category to its operations.
//! It is built once at startup and only read afterwards.

#![allow(missing_docs)]

pub mod auth;
pub mod crud;
pub mod unit_of_work;
pub mod user;
pub mod work;

pub use auth::AuthService;
pub use crud::Crud;
pub use unit_of_work::{UnitOfWork, changed_fields};
pub use user::UserService;
pub use work::WorkService;

use std::sync::Arc;

use episodic_common::{AppResult, Config};
use episodic_db::{
    entities::{comment, episode, favorite, like, notice, watch_history},
    session::SessionFactory,
};
use sea_orm::DatabaseConnection;

use crate::token::TokenIssuer;
use crate::transfer::{
    CommentCreate, CommentResponse, CommentUpdate, EpisodeCreate, EpisodeResponse, EpisodeUpdate,
    FavoriteCreate, FavoriteResponse, LikeCreate, LikeResponse, NoticeCreate, NoticeResponse,
    NoticeUpdate, WatchHistoryCreate, WatchHistoryResponse,
};

/// CRUD over episodes.
pub type EpisodeService = Crud<episode::Entity, EpisodeCreate, EpisodeResponse, EpisodeUpdate>;
/// CRUD over notices.
pub type NoticeService = Crud<notice::Entity, NoticeCreate, NoticeResponse, NoticeUpdate>;
/// CRUD over comments.
pub type CommentService = Crud<comment::Entity, CommentCreate, CommentResponse, CommentUpdate>;
/// Add, list, get and delete favorites.
pub type FavoriteService = Crud<favorite::Entity, FavoriteCreate, FavoriteResponse>;
/// Add, list, get and delete likes.
pub type LikeService = Crud<like::Entity, LikeCreate, LikeResponse>;
/// Add, list, get and delete watch history entries.
pub type WatchHistoryService =
    Crud<watch_history::Entity, WatchHistoryCreate, WatchHistoryResponse>;

/// One service per entity category, plus authentication.
#[derive(Clone, Debug)]
pub struct Services {
    pub users: UserService,
    pub works: WorkService,
    pub episodes: EpisodeService,
    pub notices: NoticeService,
    pub comments: CommentService,
    pub favorites: FavoriteService,
    pub likes: LikeService,
    pub watch_history: WatchHistoryService,
    pub auth: AuthService,
}

impl Services {
    /// Build every service over one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, tokens: TokenIssuer) -> Self {
        let factory = SessionFactory::new(db);

        Self {
            users: Crud::new(factory.clone()),
            works: Crud::new(factory.clone()),
            episodes: Crud::new(factory.clone()),
            notices: Crud::new(factory.clone()),
            comments: Crud::new(factory.clone()),
            favorites: Crud::new(factory.clone()),
            likes: Crud::new(factory.clone()),
            watch_history: Crud::new(factory.clone()),
            auth: AuthService::new(factory, tokens),
        }
    }

    /// Build every service, taking token settings from configuration.
    pub fn from_config(db: Arc<DatabaseConnection>, config: &Config) -> AppResult<Self> {
        Ok(Self::new(db, TokenIssuer::from_config(&config.token)?))
    }
}
