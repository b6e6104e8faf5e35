//! Login session and password API tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use test_case::test_case;

use crate::common::{fake_user_body, TestApp};

async fn registered(app: &TestApp, password: &str) -> String {
    let created = app.create_user(fake_user_body(password)).await;
    created["email"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = TestApp::new();
    let email = registered(&app, "correct-horse").await;

    let (status, json) = app
        .post_json(
            "/api/v1/users/login",
            json!({"email": email, "password": "correct-horse"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert!(json["token"].as_str().unwrap().split('.').count() == 3);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    let email = registered(&app, "correct-horse").await;

    let (status, _) = app
        .post_json(
            "/api/v1/users/login",
            json!({"email": email, "password": "battery-staple"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json(
            "/api/v1/users/login",
            json!({"email": "nobody@example.com", "password": "pw"}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_second_login_rejected_until_logout() {
    let app = TestApp::new();
    let email = registered(&app, "pw-123").await;
    let token = app.login(&email, "pw-123").await;

    let (status, json) = app
        .post_json("/api/v1/users/login", json!({"email": email, "password": "pw-123"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "already logged in");

    let (status, _) = app
        .request(Method::POST, "/api/v1/users/logout", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    app.login(&email, "pw-123").await;
}

#[tokio::test]
async fn test_logout_requires_bearer() {
    let app = TestApp::new();

    let (status, _) = app
        .request(Method::POST, "/api/v1/users/logout", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_is_unusable_after_logout() {
    let app = TestApp::new();
    let email = registered(&app, "pw-123").await;
    let token = app.login(&email, "pw-123").await;

    app.request(Method::POST, "/api/v1/users/logout", None, Some(&token))
        .await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/v1/users/password",
            Some(json!({"old_password": "pw-123", "new_password": "pw-456"})),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    let email = registered(&app, "old-pass").await;
    let token = app.login(&email, "old-pass").await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/v1/users/password",
            Some(json!({"old_password": "wrong", "new_password": "new-pass"})),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/v1/users/password",
            Some(json!({"old_password": "old-pass", "new_password": "new-pass"})),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.request(Method::POST, "/api/v1/users/logout", None, Some(&token))
        .await;

    let (status, _) = app
        .post_json("/api/v1/users/login", json!({"email": email, "password": "old-pass"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    app.login(&email, "new-pass").await;
}

#[test_case(16, StatusCode::OK ; "valid length")]
#[test_case(4, StatusCode::BAD_REQUEST ; "too short")]
#[test_case(500, StatusCode::BAD_REQUEST ; "too long")]
#[tokio::test]
async fn test_random_password(length: usize, expected: StatusCode) {
    let app = TestApp::new();

    let (status, json) = app
        .post_json("/api/v1/users/random-password", json!({ "length": length }))
        .await;

    assert_eq!(status, expected);
    if expected == StatusCode::OK {
        let password = json["password"].as_str().unwrap();
        assert_eq!(password.len(), length);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
