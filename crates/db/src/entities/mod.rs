//! Database entities.

#![allow(missing_docs)]

pub mod comment;
pub mod episode;
pub mod favorite;
pub mod like;
pub mod notice;
pub mod user;
pub mod watch_history;
pub mod work;

pub use comment::Entity as Comment;
pub use episode::Entity as Episode;
pub use favorite::Entity as Favorite;
pub use like::Entity as Like;
pub use notice::Entity as Notice;
pub use user::Entity as User;
pub use watch_history::Entity as WatchHistory;
pub use work::Entity as Work;
