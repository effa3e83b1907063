//! Recursive search tests: substring matching, ancestor paths, and
//! category filters.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use super::helpers::TestApp;

async fn make_folder(app: &TestApp, token: &str, name: &str, parent: Option<Uuid>) -> Uuid {
    let response = app
        .request(
            "POST",
            "/api/files/folders",
            Some(json!({"name": name, "parent_id": parent})),
            Some(token),
        )
        .await;
    response.body["data"]["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn search_annotates_hits_with_ancestor_path() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let docs = make_folder(&app, &token, "Docs", None).await;
    app.upload(&token, "report.pdf", "application/pdf", b"x", Some(docs))
        .await;
    app.upload(&token, "report-draft.txt", "text/plain", b"x", None)
        .await;

    let response = app
        .request("GET", "/api/files/search?query=report", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let hits = response.body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 2);

    // Pre-order traversal surfaces the nested hit before root files.
    assert_eq!(hits[0]["filename"], json!("report.pdf"));
    assert_eq!(hits[0]["folder_path"], json!("Docs"));
    assert_eq!(hits[1]["filename"], json!("report-draft.txt"));
    assert_eq!(hits[1]["folder_path"], json!("Root"));
}

#[tokio::test]
async fn search_matches_folders_case_insensitively() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    let parent = make_folder(&app, &token, "Work", None).await;
    make_folder(&app, &token, "Quarterly Reports", Some(parent)).await;

    let response = app
        .request("GET", "/api/files/search?query=REPORT", None, Some(&token))
        .await;
    let hits = response.body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["kind"], json!("folder"));
    assert_eq!(hits[0]["name"], json!("Quarterly Reports"));
    assert_eq!(hits[0]["folder_path"], json!("Work"));
}

#[tokio::test]
async fn empty_query_returns_no_hits() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    app.upload(&token, "notes.txt", "text/plain", b"x", None).await;

    for path in ["/api/files/search", "/api/files/search?query=%20%20"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
    }
}

#[tokio::test]
async fn search_filter_restricts_matches() {
    let app = TestApp::new().await;
    let (token, _) = app.register("alice", "correct-horse").await;

    app.upload(&token, "report.pdf", "application/pdf", b"x", None)
        .await;
    app.upload(&token, "report-cover.png", "image/png", b"x", None)
        .await;

    let response = app
        .request(
            "GET",
            "/api/files/search?query=report&filter=image",
            None,
            Some(&token),
        )
        .await;
    let hits = response.body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["filename"], json!("report-cover.png"));
}

#[tokio::test]
async fn search_does_not_cross_owners() {
    let app = TestApp::new().await;
    let (alice, _) = app.register("alice", "correct-horse").await;
    let (bob, _) = app.register("bob", "correct-horse").await;

    app.upload(&alice, "report.pdf", "application/pdf", b"x", None)
        .await;

    let response = app
        .request("GET", "/api/files/search?query=report", None, Some(&bob))
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
}
