//! Folder tree tests: creation, lookup, deletion, and recursive sizing.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::helpers::{TestApp, TestResponse};

async fn create_folder(app: &TestApp, token: &str, name: &str, parent: Option<Uuid>) -> TestResponse {
    app.request(
        "POST",
        "/api/files/folders",
        Some(json!({"name": name, "parent_id": parent})),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn create_and_fetch_folder() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let created = create_folder(&app, &token, "Docs", None).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["name"], json!("Docs"));
    assert_eq!(created.body["data"]["parent_id"], json!(null));

    let id = created.body["data"]["id"].as_str().unwrap();
    let fetched = app
        .request("GET", &format!("/api/files/folders/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["name"], json!("Docs"));
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let response = app
        .request(
            "POST",
            "/api/files/folders",
            Some(json!({"name": "   "})),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"]["message"],
        json!("Folder name is required")
    );
}

#[tokio::test]
async fn create_rejects_missing_parent() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let response = create_folder(&app, &token, "Docs", Some(Uuid::new_v4())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_empty_folder() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let created = create_folder(&app, &token, "Docs", None).await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let deleted = app
        .request("DELETE", &format!("/api/files/folders/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let fetched = app
        .request("GET", &format!("/api/files/folders/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_rejects_non_empty_folder() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let created = create_folder(&app, &token, "Docs", None).await;
    let id: Uuid = created.body["data"]["id"].as_str().unwrap().parse().unwrap();
    app.upload(&token, "notes.txt", "text/plain", b"data", Some(id))
        .await;

    let deleted = app
        .request("DELETE", &format!("/api/files/folders/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::BAD_REQUEST);
    assert_eq!(deleted.body["error"]["message"], json!("Folder is not empty"));

    // The folder and its contents survive the failed delete.
    let fetched = app
        .request("GET", &format!("/api/files/folders/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
}

#[tokio::test]
async fn folder_size_sums_whole_subtree() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let parent = create_folder(&app, &token, "Docs", None).await;
    let parent_id: Uuid = parent.body["data"]["id"].as_str().unwrap().parse().unwrap();
    let child = create_folder(&app, &token, "Reports", Some(parent_id)).await;
    let child_id: Uuid = child.body["data"]["id"].as_str().unwrap().parse().unwrap();

    app.upload(&token, "a.txt", "text/plain", b"12345", Some(parent_id))
        .await;
    app.upload(&token, "b.txt", "text/plain", b"1234567", Some(child_id))
        .await;
    // Outside the subtree, must not count.
    app.upload(&token, "c.txt", "text/plain", b"123", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/files/folders/{parent_id}/size"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["size_bytes"], json!(12));
}
