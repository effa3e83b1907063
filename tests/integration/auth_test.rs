//! Authentication flow tests: registration, login, Google sign-in,
//! token refresh, and logout.

use http::StatusCode;
use serde_json::json;

use super::helpers::TestApp;

#[tokio::test]
async fn register_returns_session_with_tokens() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "correct-horse",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], json!(true));

    let data = &response.body["data"];
    assert!(data["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(data["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(data["user"]["username"], json!("alice"));
    assert_eq!(data["user"]["email"], json!("alice@example.com"));
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    let app = TestApp::new().await;
    app.register("alice", "correct-horse").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "correct-horse",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], json!(false));
    assert_eq!(
        response.body["error"]["message"],
        json!("Username or email already exists")
    );
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_succeeds_with_username_or_email() {
    let app = TestApp::new().await;
    app.register("alice", "correct-horse").await;

    for identifier in ["alice", "alice@example.com"] {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({"identifier": identifier, "password": "correct-horse"})),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login as {identifier}");
        assert!(response.body["data"]["access_token"].as_str().is_some());
    }
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("alice", "correct-horse").await;

    // Wrong password and unknown account produce the same response.
    for (identifier, password) in [("alice", "wrong-password"), ("nobody", "correct-horse")] {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({"identifier": identifier, "password": password})),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"]["message"], json!("Invalid credentials"));
    }
}

#[tokio::test]
async fn google_sign_in_creates_account_and_reuses_it() {
    let app = TestApp::new().await;

    let first = app
        .request(
            "POST",
            "/api/auth/google",
            Some(json!({"id_token": "stub-token"})),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let first_id = first.body["data"]["user"]["id"].as_str().unwrap().to_string();
    // Username derives from the email local part.
    assert_eq!(first.body["data"]["user"]["username"], json!("gtest"));

    let second = app
        .request(
            "POST",
            "/api/auth/google",
            Some(json!({"id_token": "another-stub-token"})),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["data"]["user"]["id"], json!(first_id));
}

#[tokio::test]
async fn google_sign_in_rejects_invalid_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/google",
            Some(json!({"id_token": "invalid"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_login_rejected_for_google_account() {
    let app = TestApp::new().await;
    app.request(
        "POST",
        "/api/auth/google",
        Some(json!({"id_token": "stub-token"})),
        None,
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({"identifier": "gtest@example.com", "password": "whatever-long"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"]["message"],
        json!("Account uses Google login")
    );
}

#[tokio::test]
async fn refresh_issues_new_access_token() {
    let app = TestApp::new().await;
    let (_, refresh_token) = app.register("alice", "correct-horse").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": refresh_token})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].as_str().is_some());
    assert!(response.body["data"]["expires_at"].as_str().is_some());
}

#[tokio::test]
async fn logout_revokes_refresh_token() {
    let app = TestApp::new().await;
    let (access_token, refresh_token) = app.register("alice", "correct-horse").await;

    let logout = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(json!({"refresh_token": refresh_token})),
            Some(&access_token),
        )
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({"refresh_token": refresh_token})),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_bearer_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/files", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/files", None, Some("not-a-real-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_check_is_public() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], serde_json::json!("ok"));
}
