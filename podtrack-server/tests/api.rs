use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use podtrack_db::SqliteDatabase;
use podtrack_server::{router, ServerContext};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let database = SqliteDatabase::in_memory().await.expect("database opens");

    router(ServerContext {
        database: Arc::new(database),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(value.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .expect("request is built");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request is handled");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body is read")
        .to_bytes();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is json")
    };

    (status, value)
}

/// Creates a user, an author, and a podcast, returning their ids
async fn seed(app: &Router) -> (i64, i64, i64) {
    let (status, user) = send(
        app,
        "POST",
        "/users",
        Some(json!({ "name": "Ann", "email": "a@x.com", "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, author) = send(
        app,
        "POST",
        "/authors",
        Some(json!({ "name": "Beth", "email": "b@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, podcast) = send(
        app,
        "POST",
        "/podcasts",
        Some(json!({
            "name": "My Podcast",
            "author_id": author["id"],
            "description": "A podcast about technology"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    (
        user["id"].as_i64().unwrap(),
        author["id"].as_i64().unwrap(),
        podcast["id"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn created_user_echoes_fields_and_is_listed() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "Ann", "email": "a@x.com", "password": "hunter2" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["email"], "a@x.com");
    // Credentials never leave the database
    assert!(body.get("password").is_none());
    assert!(body.get("salt").is_none());

    let (status, body) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": 1, "name": "Ann", "email": "a@x.com" }])
    );
}

#[tokio::test]
async fn missing_rows_return_not_found() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (status, _) = send(
        &app,
        "PUT",
        "/users/999",
        Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/podcasts/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Podcast not found");
}

#[tokio::test]
async fn invalid_bodies_are_rejected() {
    let app = app().await;

    // Missing required field
    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "Ann", "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown field
    let (status, _) = send(
        &app,
        "POST",
        "/authors",
        Some(json!({ "name": "Beth", "email": "b@x.com", "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Progress outside [0, 100] is rejected before the database is touched
    let (status, _) = send(
        &app,
        "POST",
        "/progress",
        Some(json!({ "user_id": 1, "podcast_id": 1, "progress": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/progress", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn partial_update_changes_only_supplied_fields() {
    let app = app().await;
    seed(&app).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/authors/1",
        Some(json!({ "email": "beth@newmail.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Beth");
    assert_eq!(body["email"], "beth@newmail.com");

    // An empty update leaves everything as-is
    let (status, body) = send(&app, "PUT", "/authors/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Beth");
    assert_eq!(body["email"], "beth@newmail.com");
}

#[tokio::test]
async fn progress_lifecycle() {
    let app = app().await;
    let (user_id, _, podcast_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/progress",
        Some(json!({ "user_id": user_id, "podcast_id": podcast_id, "progress": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "id": 1, "user_id": user_id, "podcast_id": podcast_id, "progress": 30 })
    );

    // Composite lookup and update
    let uri = format!("/progress/{user_id}/{podcast_id}");

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 30);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "progress": 60 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 60);

    let (status, body) = send(&app, "GET", "/progress/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 60);

    let (status, body) = send(&app, "DELETE", "/progress/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn progress_with_missing_user_inserts_nothing() {
    let app = app().await;
    let (_, _, podcast_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/progress",
        Some(json!({ "user_id": 999, "podcast_id": podcast_id, "progress": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (_, body) = send(&app, "GET", "/progress", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn delete_twice_yields_no_content_then_not_found() {
    let app = app().await;
    seed(&app).await;

    let (status, body) = send(&app, "DELETE", "/podcasts/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "DELETE", "/podcasts/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Podcast not found");
}

#[tokio::test]
async fn podcast_creation_requires_existing_author() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/podcasts",
        Some(json!({ "name": "Orphan", "author_id": 42, "description": "No author" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Author not found");

    let (_, body) = send(&app, "GET", "/podcasts", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn queue_lifecycle() {
    let app = app().await;
    let (user_id, _, podcast_id) = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/queue",
        Some(json!({ "user_id": user_id, "podcast_id": podcast_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let entry_id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, "GET", &format!("/queue/{entry_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["podcast_id"], podcast_id);

    // Pointing an entry at a missing podcast is refused
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/queue/{entry_id}"),
        Some(json!({ "podcast_id": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/queue/{entry_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/queue", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn subscription_lifecycle() {
    let app = app().await;

    // A subscription may not reference a missing user
    let (status, body) = send(
        &app,
        "POST",
        "/subscriptions",
        Some(json!({
            "title": "Tech Weekly",
            "user_id": 1,
            "url": "https://example.com/feed.xml"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");

    let (user_id, _, _) = seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/subscriptions",
        Some(json!({
            "title": "Tech Weekly",
            "language": "en",
            "user_id": user_id,
            "url": "https://example.com/feed.xml"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Tech Weekly");
    assert_eq!(body["language"], "en");
    assert_eq!(body["description"], Value::Null);
    assert!(body["subscribed_on"].is_string());

    let subscribed_on = body["subscribed_on"].clone();
    let subscription_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/subscriptions/{subscription_id}"),
        Some(json!({ "description": "All things tech" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Tech Weekly");
    assert_eq!(body["description"], "All things tech");
    assert_eq!(body["subscribed_on"], subscribed_on);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/subscriptions/{subscription_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/subscriptions", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn api_document_is_served() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/api.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users"].is_object());
    assert!(body["paths"]["/progress/{user_id}/{podcast_id}"].is_object());
}
