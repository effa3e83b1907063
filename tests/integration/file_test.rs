//! File lifecycle tests: upload, metadata, download, export, delete,
//! and the recent-items feed.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::helpers::TestApp;

#[tokio::test]
async fn upload_and_fetch_metadata() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let uploaded = app
        .upload(&token, "notes.txt", "text/plain", b"hello stratus", None)
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{:?}", uploaded.body);

    let data = &uploaded.body["data"];
    assert_eq!(data["filename"], json!("notes.txt"));
    assert_eq!(data["content_type"], json!("text/plain"));
    assert_eq!(data["size_bytes"], json!(13));
    assert_eq!(data["folder_id"], json!(null));

    let id = data["id"].as_str().unwrap();
    let fetched = app
        .request("GET", &format!("/api/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["filename"], json!("notes.txt"));
}

#[tokio::test]
async fn upload_into_missing_folder_is_not_found() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let response = app
        .upload(
            &token,
            "notes.txt",
            "text/plain",
            b"data",
            Some(Uuid::new_v4()),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    const BOUNDARY: &str = "stratus-test-boundary";
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"folder_id\"\r\n\r\nnull\r\n\
         --{BOUNDARY}--\r\n"
    );

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/files/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("Authorization", format!("Bearer {token}"))
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn download_returns_original_bytes() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let content = b"the quick brown fox";
    let uploaded = app
        .upload(&token, "fox.txt", "text/plain", content, None)
        .await;
    let id = uploaded.body["data"]["id"].as_str().unwrap().to_string();

    let (status, bytes) = app
        .request_raw(&format!("/api/files/{id}/download"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, content);
}

#[tokio::test]
async fn export_points_at_download_endpoint() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let uploaded = app
        .upload(&token, "notes.txt", "text/plain", b"data", None)
        .await;
    let id = uploaded.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/files/{id}/export"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    // Local storage cannot presign, so the export falls back to the
    // server's own download route.
    assert_eq!(
        response.body["data"]["url"],
        json!(format!("/api/files/{id}/download"))
    );
    assert_eq!(response.body["data"]["filename"], json!("notes.txt"));
}

#[tokio::test]
async fn delete_removes_file() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let uploaded = app
        .upload(&token, "notes.txt", "text/plain", b"data", None)
        .await;
    let id = uploaded.body["data"]["id"].as_str().unwrap().to_string();

    let deleted = app
        .request("DELETE", &format!("/api/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let fetched = app
        .request("GET", &format!("/api/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn files_are_scoped_to_their_owner() {
    let app = TestApp::new().await;
    let (alice, _) = app.register("alice", "correct-horse").await;
    let (bob, _) = app.register("bob", "correct-horse").await;

    let uploaded = app
        .upload(&alice, "secret.txt", "text/plain", b"data", None)
        .await;
    let id = uploaded.body["data"]["id"].as_str().unwrap().to_string();

    let fetched = app
        .request("GET", &format!("/api/files/{id}"), None, Some(&bob))
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recent_combines_folders_and_files() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    app.request(
        "POST",
        "/api/files/folders",
        Some(json!({"name": "Docs"})),
        Some(&token),
    )
    .await;
    app.upload(&token, "notes.txt", "text/plain", b"data", None)
        .await;

    let response = app
        .request("GET", "/api/files/recent", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Folders come first in the combined feed.
    assert_eq!(items[0]["kind"], json!("folder"));
    assert_eq!(items[0]["name"], json!("Docs"));
    assert_eq!(items[1]["kind"], json!("file"));
    assert_eq!(items[1]["filename"], json!("notes.txt"));
}

#[tokio::test]
async fn recent_filter_restricts_both_kinds() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    // A folder whose subtree holds only a text file.
    let folder = app
        .request(
            "POST",
            "/api/files/folders",
            Some(json!({"name": "Docs"})),
            Some(&token),
        )
        .await;
    let folder_id: Uuid = folder.body["data"]["id"].as_str().unwrap().parse().unwrap();
    app.upload(&token, "notes.txt", "text/plain", b"data", Some(folder_id))
        .await;
    app.upload(&token, "photo.png", "image/png", b"png-bytes", None)
        .await;

    let response = app
        .request("GET", "/api/files/recent?filter=image", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["filename"], json!("photo.png"));
}
