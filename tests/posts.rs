//! Tests for the post endpoints: creation requires a login, created posts
//! snapshot their author, listing is newest-first.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use blog_auth_server::app;
use blog_auth_server::state::AppState;
use blog_auth_server::token::TokenService;

const SECRET: &[u8] = b"integration-test-secret";

async fn test_app() -> axum::Router {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&db).await.unwrap();

    app(AppState {
        db,
        tokens: Arc::new(TokenService::new(SECRET)),
    })
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("access_token={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return their session token
async fn login_as(app: &axum::Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            None,
            json!({ "username": username, "password": "correcthorse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("access_token="))
        .map(|v| {
            v["access_token=".len()..]
                .split(';')
                .next()
                .unwrap()
                .to_string()
        })
        .unwrap()
}

#[tokio::test]
async fn creating_posts_requires_login() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/posts",
            None,
            json!({ "title": "Hello", "body": "World" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_post_snapshots_author() {
    let app = test_app().await;
    let token = login_as(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/posts",
            Some(&token),
            json!({ "title": "Hello", "body": "First post", "tags": ["intro", "meta"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let post = body_json(response).await;
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["tags"], json!(["intro", "meta"]));
    assert_eq!(post["username"], "alice");
    assert!(post["user_id"].is_string());
    assert!(post["published_at"].is_string());
}

#[tokio::test]
async fn post_title_and_body_are_required() {
    let app = test_app().await;
    let token = login_as(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/posts",
            Some(&token),
            json!({ "title": " ", "body": "content" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_returns_newest_first() {
    let app = test_app().await;
    let token = login_as(&app, "alice").await;

    for title in ["first", "second"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/posts",
                Some(&token),
                json!({ "title": title, "body": "content" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/posts").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let posts = body_json(response).await;
    let titles: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}
