//! API integration tests.
//!
//! Each test drives the full router over a migrated in-memory database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use episodic_api::{AppState, app};
use episodic_common::Config;
use episodic_core::Services;
use episodic_db::test_utils::TestDatabase;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::from_config(db.connection(), &Config::default()).unwrap();
    app(AppState::new(services))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user and log in, returning the user id and access token.
async fn sign_up(app: &Router, username: &str) -> (i64, String) {
    let response = send(
        app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({ "username": username, "password": "secret" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(
        app,
        "POST",
        "/api/v1/login",
        None,
        Some(json!({ "username": username, "password": "secret" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = response
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap()
        .to_string();

    (id, token)
}

async fn create_work(app: &Router, token: &str, title: &str) -> i64 {
    let response = send(
        app,
        "POST",
        "/api/v1/works",
        Some(token),
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_user_hides_password() {
    let app = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/v1/users",
        None,
        Some(json!({ "username": "alice", "password": "secret" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = test_app().await;
    sign_up(&app, "alice").await;

    let response = send(
        &app,
        "POST",
        "/api/v1/login",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::AUTHORIZATION).is_none());
    assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_returns_bearer_header() {
    let app = test_app().await;
    let (_, token) = sign_up(&app, "alice").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_create_work_without_token_is_unauthorized() {
    let app = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/v1/works",
        None,
        Some(json!({ "title": "Untitled" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = test_app().await;

    let response = send(
        &app,
        "POST",
        "/api/v1/works",
        Some("not-a-token"),
        Some(json!({ "title": "Untitled" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_works_by_user_in_insertion_order() {
    let app = test_app().await;
    let (alice, token) = sign_up(&app, "alice").await;
    create_work(&app, &token, "first").await;
    create_work(&app, &token, "second").await;

    let response = send(&app, "GET", &format!("/api/v1/works/{alice}"), None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["first", "second"]);
}

#[tokio::test]
async fn test_works_by_missing_user_is_not_found() {
    let app = test_app().await;

    let response = send(&app, "GET", "/api/v1/works/999", None, None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_by_query_string() {
    let app = test_app().await;
    let (_, token) = sign_up(&app, "alice").await;
    create_work(&app, &token, "Spring").await;
    create_work(&app, &token, "Summer").await;
    create_work(&app, &token, "Autumn").await;

    let response = send(&app, "GET", "/api/v1/works?title__like=S%25", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_operator_is_bad_request() {
    let app = test_app().await;

    let response = send(&app, "GET", "/api/v1/users?id__between=1,3", None, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_OPERATOR");
}

#[tokio::test]
async fn test_unknown_field_is_bad_request() {
    let app = test_app().await;

    let response = send(&app, "GET", "/api/v1/users?nickname=bob", None, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_FIELD");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = test_app().await;
    let (alice, _) = sign_up(&app, "alice").await;
    let uri = format!("/api/v1/users/{alice}");

    let first = send(&app, "DELETE", &uri, None, None).await;
    let second = send(&app, "DELETE", &uri, None, None).await;

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        send(&app, "GET", &uri, None, None).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_update_by_non_owner_is_forbidden() {
    let app = test_app().await;
    let (_, alice_token) = sign_up(&app, "alice").await;
    let (_, bob_token) = sign_up(&app, "bob").await;
    let work = create_work(&app, &alice_token, "Mine").await;

    let response = send(
        &app,
        "PUT",
        &format!("/api/v1/works/{work}"),
        Some(&bob_token),
        Some(json!({ "title": "Stolen" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_posts_episode_and_others_comment() {
    let app = test_app().await;
    let (_, alice_token) = sign_up(&app, "alice").await;
    let (bob, bob_token) = sign_up(&app, "bob").await;
    let work = create_work(&app, &alice_token, "Serial").await;

    let episode = json!({ "work_id": work, "title": "Chapter 1" });
    let denied = send(
        &app,
        "POST",
        "/api/v1/episodes",
        Some(&bob_token),
        Some(episode.clone()),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        "POST",
        "/api/v1/episodes",
        Some(&alice_token),
        Some(episode),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let episode_id = json_body(response).await["id"].as_i64().unwrap();

    let response = send(
        &app,
        "POST",
        "/api/v1/comments",
        Some(&bob_token),
        Some(json!({ "episode_id": episode_id, "content": "Great start" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["user_id"].as_i64(), Some(bob));

    let response = send(
        &app,
        "GET",
        &format!("/api/v1/comments?episode_id={episode_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_history_only_lists_own_entries() {
    let app = test_app().await;
    let (alice, alice_token) = sign_up(&app, "alice").await;
    let (_, bob_token) = sign_up(&app, "bob").await;
    let work = create_work(&app, &alice_token, "Serial").await;

    for token in [&alice_token, &bob_token] {
        let response = send(
            &app,
            "POST",
            "/api/v1/history",
            Some(token),
            Some(json!({ "work_id": work })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(&app, "GET", "/api/v1/history", Some(&alice_token), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["user_id"].as_i64(), Some(alice));
}

#[tokio::test]
async fn test_comment_with_two_parents_is_bad_request() {
    let app = test_app().await;
    let (_, token) = sign_up(&app, "alice").await;

    let response = send(
        &app,
        "POST",
        "/api/v1/comments",
        Some(&token),
        Some(json!({ "episode_id": 999, "notice_id": 1, "content": "hello" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
}
