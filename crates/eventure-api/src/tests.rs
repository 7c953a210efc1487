use std::sync::Arc;

use argon2::Params;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use serde_json::{Value, json};
use tower::ServiceExt;

use eventure_core::Argon2Credentials;
use eventure_db::Database;

use crate::routes::router;
use crate::session::SessionIssuer;
use crate::state::AppStateInner;

fn app() -> Router {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    router(Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        credentials: Arc::new(Argon2Credentials::with_params(params)),
        sessions: SessionIssuer::new("test-secret", Duration::days(30)),
    }))
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Register `username` and return (token, user id).
async fn signup(app: &Router, username: &str) -> (String, String) {
    let (status, body) = call(
        app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "hunter22",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn register_returns_token_and_fresh_user() {
    let app = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "ada", "email": "ada@example.com", "password": "hunter22" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["level"], 1);
    assert_eq!(body["user"]["points"], 0);
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let app = app();
    signup(&app, "ada").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "other", "email": "ada@example.com", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn missing_field_is_400() {
    let app = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({ "username": "ada", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required field: email");
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let app = app();
    signup(&app, "ada").await;

    let wrong_password = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "nope" })),
    )
    .await;
    let unknown_email = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": "who@example.com", "password": "hunter22" })),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn login_then_profile() {
    let app = app();
    signup(&app, "ada").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, profile) = call(&app, "GET", "/api/user/profile", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "ada");
    assert_eq!(profile["email"], "ada@example.com");
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = app();

    let (missing, _) = call(&app, "GET", "/api/user/profile", None, None).await;
    let (garbage, body) = call(&app, "GET", "/api/friends", Some("garbage"), None).await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn adventure_updates_profile() {
    let app = app();
    let (token, _) = signup(&app, "ada").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/adventures",
        Some(token.as_str()),
        Some(json!({
            "title": "Half Dome",
            "description": "Cables route",
            "location": "Yosemite",
            "category": "outdoors",
            "points_earned": 2500,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["adventure"]["points_earned"], 2500);

    let (_, profile) = call(&app, "GET", "/api/user/profile", Some(token.as_str()), None).await;
    assert_eq!(profile["points"], 2500);
    assert_eq!(profile["level"], 3);
    assert_eq!(profile["streak"], 1);
    assert_eq!(profile["adventures_completed"], 1);

    let (_, listed) = call(&app, "GET", "/api/adventures", Some(token.as_str()), None).await;
    assert_eq!(listed["adventures"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn memory_round_trip() {
    let app = app();
    let (token, _) = signup(&app, "ada").await;

    let (status, _) = call(
        &app,
        "POST",
        "/api/memories",
        Some(token.as_str()),
        Some(json!({ "title": "Fog", "description": "Thick fog on the bay" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = call(&app, "GET", "/api/memories", Some(token.as_str()), None).await;
    assert_eq!(listed["memories"][0]["title"], "Fog");

    let (_, profile) = call(&app, "GET", "/api/user/profile", Some(token.as_str()), None).await;
    assert_eq!(profile["points"], 0);
}

#[tokio::test]
async fn friend_request_lifecycle() {
    let app = app();
    let (ada_token, ada_id) = signup(&app, "ada").await;
    let (grace_token, grace_id) = signup(&app, "grace").await;

    let (status, sent) = call(
        &app,
        "POST",
        "/api/friends/request",
        Some(ada_token.as_str()),
        Some(json!({ "friend_id": grace_id, "message": "Hike Saturday?" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let request_id = sent["request_id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        "POST",
        "/api/friends/request",
        Some(ada_token.as_str()),
        Some(json!({ "friend_id": grace_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, incoming) = call(&app, "GET", "/api/friends/requests", Some(grace_token.as_str()), None).await;
    assert_eq!(incoming["requests"][0]["sender"]["username"], "ada");
    assert_eq!(incoming["requests"][0]["message"], "Hike Saturday?");

    let respond_uri = format!("/api/friends/requests/{}/respond", request_id);

    let (status, _) = call(
        &app,
        "POST",
        &respond_uri,
        Some(grace_token.as_str()),
        Some(json!({ "action": "maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "POST",
        &respond_uri,
        Some(ada_token.as_str()),
        Some(json!({ "action": "accept" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        "POST",
        &respond_uri,
        Some(grace_token.as_str()),
        Some(json!({ "action": "accept" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Friend request accepted successfully");

    let (status, _) = call(
        &app,
        "POST",
        &respond_uri,
        Some(grace_token.as_str()),
        Some(json!({ "action": "decline" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, ada_friends) = call(&app, "GET", "/api/friends", Some(ada_token.as_str()), None).await;
    let (_, grace_friends) = call(&app, "GET", "/api/friends", Some(grace_token.as_str()), None).await;
    assert_eq!(ada_friends["friends"][0]["id"], grace_id.as_str());
    assert_eq!(grace_friends["friends"][0]["id"], ada_id.as_str());
    assert_eq!(grace_friends["friends"][0]["points"], 0);
}

#[tokio::test]
async fn self_request_is_409_and_missing_friend_is_400() {
    let app = app();
    let (token, id) = signup(&app, "ada").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/friends/request",
        Some(token.as_str()),
        Some(json!({ "friend_id": id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Cannot send friend request to yourself");

    let (status, _) = call(&app, "POST", "/api/friends/request", Some(token.as_str()), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_with_empty_query_is_empty() {
    let app = app();
    let (token, _) = signup(&app, "ada").await;
    signup(&app, "adam").await;

    let (_, empty) = call(&app, "GET", "/api/friends/search?q=", Some(token.as_str()), None).await;
    let (_, absent) = call(&app, "GET", "/api/friends/search", Some(token.as_str()), None).await;
    let (_, hits) = call(&app, "GET", "/api/friends/search?q=ada", Some(token.as_str()), None).await;

    assert_eq!(empty["users"], json!([]));
    assert_eq!(absent["users"], json!([]));
    assert_eq!(hits["users"].as_array().unwrap().len(), 1);
    assert_eq!(hits["users"][0]["username"], "adam");
}

#[tokio::test]
async fn badge_catalog_is_served() {
    let app = app();
    let (token, _) = signup(&app, "ada").await;

    let (status, body) = call(&app, "GET", "/api/badges", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["badges"].as_array().unwrap().len(), 5);

    let (_, mine) = call(&app, "GET", "/api/user/badges", Some(token.as_str()), None).await;
    assert_eq!(mine["badges"], json!([]));
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn negative_points_are_a_validation_error() {
    let app = app();
    let (token, _) = signup(&app, "ada").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/adventures",
        Some(token.as_str()),
        Some(json!({
            "title": "Backwards",
            "description": "x",
            "location": "y",
            "category": "z",
            "points_earned": -5,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));

    let (_, profile) = call(&app, "GET", "/api/user/profile", Some(token.as_str()), None).await;
    assert_eq!(profile["adventures_completed"], 0);
}

#[tokio::test]
async fn body_without_json_content_type_gets_a_message() {
    let app = app();
    let (token, _) = signup(&app, "ada").await;

    let (status, body) = call(&app, "POST", "/api/memories", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unknown_register_fields_are_ignored() {
    let app = app();
    let (status, _) = call(
        &app,
        "POST",
        "/api/register",
        None,
        Some(json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "hunter22",
            "referral": "friend",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_request_id_is_not_found() {
    let app = app();
    let (token, _) = signup(&app, "ada").await;

    let (malformed, malformed_body) = call(
        &app,
        "POST",
        "/api/friends/requests/42/respond",
        Some(token.as_str()),
        Some(json!({ "action": "accept" })),
    )
    .await;
    let unknown_uri = format!("/api/friends/requests/{}/respond", uuid::Uuid::new_v4());
    let (unknown, unknown_body) = call(
        &app,
        "POST",
        &unknown_uri,
        Some(token.as_str()),
        Some(json!({ "action": "accept" })),
    )
    .await;

    assert_eq!(malformed, StatusCode::NOT_FOUND);
    assert_eq!(malformed_body["message"], "Friend request not found");
    assert_eq!((malformed, malformed_body), (unknown, unknown_body));
}
