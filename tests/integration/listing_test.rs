//! Folder listing tests: pagination, the `null` folder sentinel, and
//! category-filtered listings.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::helpers::TestApp;

#[tokio::test]
async fn root_listing_paginates_newest_first() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    for i in 0..25 {
        let response = app
            .upload(&token, &format!("file-{i}.txt"), "text/plain", b"x", None)
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let page1 = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(page1.status, StatusCode::OK);
    let files = page1.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 20);
    assert_eq!(files[0]["filename"], json!("file-24.txt"));

    let page2 = app
        .request("GET", "/api/files?page=2", None, Some(&token))
        .await;
    let files = page2.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 5);
    assert_eq!(files[4]["filename"], json!("file-0.txt"));
}

#[tokio::test]
async fn listing_rejects_oversized_limit() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let response = app
        .request("GET", "/api/files?limit=1000", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn null_folder_id_means_root() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    app.upload(&token, "root.txt", "text/plain", b"x", None).await;

    let response = app
        .request("GET", "/api/files?folder_id=null", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let files = response.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], json!("root.txt"));
}

#[tokio::test]
async fn listing_scopes_to_requested_folder() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let folder = app
        .request(
            "POST",
            "/api/files/folders",
            Some(json!({"name": "Docs"})),
            Some(&token),
        )
        .await;
    let folder_id: Uuid = folder.body["data"]["id"].as_str().unwrap().parse().unwrap();

    app.upload(&token, "inside.txt", "text/plain", b"x", Some(folder_id))
        .await;
    app.upload(&token, "outside.txt", "text/plain", b"x", None)
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/files?folder_id={folder_id}"),
            None,
            Some(&token),
        )
        .await;
    let files = response.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], json!("inside.txt"));
}

#[tokio::test]
async fn filter_prunes_files_and_folders() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    // "Pics" holds an image somewhere in its subtree; "Docs" does not.
    let pics = app
        .request(
            "POST",
            "/api/files/folders",
            Some(json!({"name": "Pics"})),
            Some(&token),
        )
        .await;
    let pics_id: Uuid = pics.body["data"]["id"].as_str().unwrap().parse().unwrap();
    let docs = app
        .request(
            "POST",
            "/api/files/folders",
            Some(json!({"name": "Docs"})),
            Some(&token),
        )
        .await;
    let docs_id: Uuid = docs.body["data"]["id"].as_str().unwrap().parse().unwrap();

    app.upload(&token, "photo.png", "image/png", b"x", Some(pics_id))
        .await;
    app.upload(&token, "report.pdf", "application/pdf", b"x", Some(docs_id))
        .await;
    app.upload(&token, "banner.jpg", "image/jpeg", b"x", None)
        .await;
    app.upload(&token, "notes.txt", "text/plain", b"x", None)
        .await;

    let response = app
        .request("GET", "/api/files?filter=image", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let files = response.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], json!("banner.jpg"));

    let folders = response.body["data"]["folders"].as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["name"], json!("Pics"));
}

#[tokio::test]
async fn listing_rejects_malformed_folder_id() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let response = app
        .request("GET", "/api/files?folder_id=not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
