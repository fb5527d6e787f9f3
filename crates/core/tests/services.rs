//! Service-layer tests against a migrated in-memory database.

#![allow(clippy::unwrap_used)]

use chrono::{Duration, Utc};
use episodic_common::{AppError, config::TokenConfig};
use episodic_core::{
    Services, TokenIssuer,
    transfer::{
        CommentCreate, Credentials, EpisodeCreate, NoticeCreate, UserCreate, UserUpdate,
        WorkCreate, WorkUpdate,
    },
};
use episodic_db::{
    entities::user,
    repositories::{Condition, RawCondition},
    test_utils::TestDatabase,
};
use serde_json::json;

async fn setup() -> (TestDatabase, Services) {
    let db = TestDatabase::new().await.unwrap();
    let tokens = TokenIssuer::from_config(&TokenConfig::default()).unwrap();
    let services = Services::new(db.connection(), tokens);
    (db, services)
}

fn new_user(username: &str) -> UserCreate {
    UserCreate {
        username: username.to_string(),
        password: "pw".to_string(),
    }
}

fn new_work(user_id: i32, title: &str) -> WorkCreate {
    WorkCreate {
        user_id,
        title: title.to_string(),
        description: Some("about".to_string()),
    }
}

#[tokio::test]
async fn test_add_then_get_returns_generated_fields() {
    let (_db, services) = setup().await;

    let added = services.users.add(new_user("alice")).await.unwrap();
    assert!(added.id > 0);
    assert_eq!(added.username, "alice");

    let fetched = services.users.get(added.id).await.unwrap();
    assert_eq!(fetched, added);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (_db, services) = setup().await;

    let err = services.users.get(99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "User with id 99 not found"));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (_db, services) = setup().await;
    let added = services.users.add(new_user("alice")).await.unwrap();

    services.users.delete(added.id).await.unwrap();
    services.users.delete(added.id).await.unwrap();
    services.users.delete(12345).await.unwrap();

    assert!(services.users.list(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_with_same_value_is_a_noop() {
    let (_db, services) = setup().await;
    let added = services.users.add(new_user("alice")).await.unwrap();

    let updated = services
        .users
        .update(
            added.id,
            UserUpdate {
                username: Some("alice".to_string()),
                password: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated, added);
}

#[tokio::test]
async fn test_update_with_new_value_is_applied() {
    let (_db, services) = setup().await;
    let added = services.users.add(new_user("alice")).await.unwrap();

    let updated = services
        .users
        .update(
            added.id,
            UserUpdate {
                username: Some("bob".to_string()),
                password: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, added.id);
    assert_eq!(updated.username, "bob");
    assert_eq!(services.users.get(added.id).await.unwrap().username, "bob");
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let (_db, services) = setup().await;

    let err = services
        .users
        .update(5, UserUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_setting_description_to_declared_default_is_ignored() {
    let (_db, services) = setup().await;
    let author = services.users.add(new_user("alice")).await.unwrap();
    let work = services.works.add(new_work(author.id, "Saga")).await.unwrap();

    let updated = services
        .works
        .update(
            work.id,
            WorkUpdate {
                title: Some("Saga II".to_string()),
                description: Some(String::new()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Saga II");
    assert_eq!(updated.description.as_deref(), Some("about"));
}

#[tokio::test]
async fn test_between_is_invalid_operator_for_every_category() {
    let (_db, services) = setup().await;
    let raw = [RawCondition::new("id", "between", json!([1, 2]))];

    assert!(matches!(
        services.users.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
    assert!(matches!(
        services.works.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
    assert!(matches!(
        services.episodes.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
    assert!(matches!(
        services.notices.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
    assert!(matches!(
        services.comments.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
    assert!(matches!(
        services.favorites.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
    assert!(matches!(
        services.likes.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
    assert!(matches!(
        services.watch_history.list(&raw).await,
        Err(AppError::InvalidOperator(_))
    ));
}

#[tokio::test]
async fn test_unknown_field_is_invalid_field() {
    let (_db, services) = setup().await;
    let raw = [RawCondition::new("nickname", "eq", json!("alice"))];

    assert!(matches!(
        services.users.list(&raw).await,
        Err(AppError::InvalidField(_))
    ));
}

#[tokio::test]
async fn test_list_filters_and_orders_by_id() {
    let (_db, services) = setup().await;
    for name in ["alice", "albert", "bob"] {
        services.users.add(new_user(name)).await.unwrap();
    }

    let raw = [RawCondition::new("username", "like", json!("al%"))];
    let names: Vec<_> = services
        .users
        .list(&raw)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["alice", "albert"]);

    let typed = services
        .users
        .list_where(&[Condition::<user::Entity>::is_in(user::Column::Id, [3])])
        .await
        .unwrap();
    assert_eq!(typed.len(), 1);
    assert_eq!(typed[0].username, "bob");
}

#[tokio::test]
async fn test_works_listed_in_insertion_order() {
    let (_db, services) = setup().await;
    let author = services.users.add(new_user("alice")).await.unwrap();

    let first = services.works.add(new_work(author.id, "First")).await.unwrap();
    let second = services.works.add(new_work(author.id, "Second")).await.unwrap();

    let works = services.works.list_by_user(author.id).await.unwrap();
    let ids: Vec<_> = works.iter().map(|w| w.id).collect();
    assert_eq!(ids, [first.id, second.id]);
}

#[tokio::test]
async fn test_list_by_missing_user_is_not_found() {
    let (_db, services) = setup().await;

    let err = services.works.list_by_user(42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_failed_delete_rolls_back() {
    let (_db, services) = setup().await;
    let author = services.users.add(new_user("alice")).await.unwrap();
    services.works.add(new_work(author.id, "Kept")).await.unwrap();

    // The work still references the user.
    let err = services.users.delete(author.id).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    assert_eq!(services.users.get(author.id).await.unwrap(), author);
}

#[tokio::test]
async fn test_invalid_create_input_is_rejected() {
    let (_db, services) = setup().await;

    let err = services.users.add(new_user("")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_comment_needs_exactly_one_parent() {
    let (_db, services) = setup().await;
    let author = services.users.add(new_user("alice")).await.unwrap();
    let work = services.works.add(new_work(author.id, "Saga")).await.unwrap();
    let episode = services
        .episodes
        .add(EpisodeCreate {
            work_id: work.id,
            title: "Pilot".to_string(),
            content: None,
        })
        .await
        .unwrap();

    let orphan = CommentCreate {
        user_id: author.id,
        episode_id: None,
        notice_id: None,
        content: "hello".to_string(),
    };
    assert!(matches!(
        services.comments.add(orphan).await,
        Err(AppError::Validation(_))
    ));

    let comment = services
        .comments
        .add(CommentCreate {
            user_id: author.id,
            episode_id: Some(episode.id),
            notice_id: None,
            content: "hello".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(comment.episode_id, Some(episode.id));
    assert_eq!(comment.notice_id, None);
}

#[tokio::test]
async fn test_search_comments_without_episode() {
    let (_db, services) = setup().await;
    let author = services.users.add(new_user("alice")).await.unwrap();
    let work = services.works.add(new_work(author.id, "Saga")).await.unwrap();
    let episode = services
        .episodes
        .add(EpisodeCreate {
            work_id: work.id,
            title: "Pilot".to_string(),
            content: None,
        })
        .await
        .unwrap();
    let notice = services
        .notices
        .add(NoticeCreate {
            work_id: work.id,
            title: "Hiatus".to_string(),
            content: None,
        })
        .await
        .unwrap();

    for (episode_id, notice_id) in [(Some(episode.id), None), (None, Some(notice.id))] {
        services
            .comments
            .add(CommentCreate {
                user_id: author.id,
                episode_id,
                notice_id,
                content: "hello".to_string(),
            })
            .await
            .unwrap();
    }

    let on_notices = services
        .comments
        .list(&[RawCondition::new("episode_id", "eq", json!(null))])
        .await
        .unwrap();

    assert_eq!(on_notices.len(), 1);
    assert_eq!(on_notices[0].notice_id, Some(notice.id));
}

#[tokio::test]
async fn test_username_lookups() {
    let (_db, services) = setup().await;
    services.users.add(new_user("alice")).await.unwrap();

    assert!(services.users.username_exists("alice").await.unwrap());
    assert!(!services.users.username_exists("bob").await.unwrap());
    assert_eq!(
        services
            .users
            .find_by_username("alice")
            .await
            .unwrap()
            .map(|u| u.username),
        Some("alice".to_string())
    );
}

#[tokio::test]
async fn test_login_with_wrong_password_finds_nothing() {
    let (_db, services) = setup().await;
    services.users.add(new_user("alice")).await.unwrap();

    let result = services
        .auth
        .login(&Credentials {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_login_token_round_trip_and_expiry() {
    let (_db, services) = setup().await;
    let added = services.users.add(new_user("alice")).await.unwrap();

    let user = services
        .auth
        .login(&Credentials {
            username: "alice".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user, added);

    let token = services.auth.issue_token(&user).unwrap();
    let claims = services.auth.verify_token(&token).unwrap();
    assert_eq!(claims.id, added.id);
    assert_eq!(claims.username, "alice");

    let later = Utc::now() + Duration::minutes(31);
    assert!(services.auth.tokens().verify_at(&token, later).is_none());
}
