//! End-to-end tests for the submission and proxy routes against a fake
//! archive endpoint.

mod helpers;

use helpers::{file_id, spawn_app};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_submit_file_returns_remote_id() {
    let app = spawn_app();
    let remote = MockServer::start().await;
    app.configure_endpoint(&remote.uri());

    Mock::given(method("POST"))
        .and(path("/api/submit-file"))
        .and(header("x-access-secret", "test-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "abc123"})))
        .expect(1)
        .mount(&remote)
        .await;

    let owner_dir = app.storage.path().join("alice");
    std::fs::create_dir_all(&owner_dir).unwrap();
    let file_path = owner_dir.join("notes.txt");
    std::fs::write(&file_path, b"contents").unwrap();

    let response = app
        .server
        .post("/api/v1/submit-file")
        .add_header("x-owner", "alice")
        .json(&json!({ "file_id": file_id(&file_path) }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["remote_file_id"], "abc123");
}

#[tokio::test]
async fn test_unknown_file_id_is_file_not_found() {
    let app = spawn_app();
    let remote = MockServer::start().await;
    app.configure_endpoint(&remote.uri());

    std::fs::create_dir_all(app.storage.path().join("alice")).unwrap();

    let response = app
        .server
        .post("/api/v1/submit-file")
        .add_header("x-owner", "alice")
        .json(&json!({ "file_id": 999_999_999u64 }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "File not found");

    // Nothing reached the endpoint.
    assert!(remote.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remote_rejection_is_bad_credentials() {
    let app = spawn_app();
    let remote = MockServer::start().await;
    app.configure_endpoint(&remote.uri());

    Mock::given(method("POST"))
        .and(path("/api/submit-file"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&remote)
        .await;

    let owner_dir = app.storage.path().join("alice");
    std::fs::create_dir_all(&owner_dir).unwrap();
    let file_path = owner_dir.join("notes.txt");
    std::fs::write(&file_path, b"contents").unwrap();

    let response = app
        .server
        .post("/api/v1/submit-file")
        .add_header("x-owner", "alice")
        .json(&json!({ "file_id": file_id(&file_path) }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Bad credentials");
}

#[tokio::test]
async fn test_success_without_remote_id_is_upload_error() {
    let app = spawn_app();
    let remote = MockServer::start().await;
    app.configure_endpoint(&remote.uri());

    Mock::given(method("POST"))
        .and(path("/api/submit-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&remote)
        .await;

    let owner_dir = app.storage.path().join("alice");
    std::fs::create_dir_all(&owner_dir).unwrap();
    let file_path = owner_dir.join("notes.txt");
    std::fs::write(&file_path, b"contents").unwrap();

    let response = app
        .server
        .post("/api/v1/submit-file")
        .add_header("x-owner", "alice")
        .json(&json!({ "file_id": file_id(&file_path) }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "File upload error");
}

#[tokio::test]
async fn test_folder_submission_packs_zip_and_cleans_spool() {
    let app = spawn_app();
    let remote = MockServer::start().await;
    app.configure_endpoint(&remote.uri());

    Mock::given(method("POST"))
        .and(path("/api/submit-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "dir-7"})))
        .expect(1)
        .mount(&remote)
        .await;

    let project = app.storage.path().join("alice").join("project");
    std::fs::create_dir_all(project.join("empty")).unwrap();
    std::fs::write(project.join("readme.md"), b"# readme").unwrap();

    let response = app
        .server
        .post("/api/v1/submit-file")
        .add_header("x-owner", "alice")
        .json(&json!({ "file_id": file_id(&project) }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["remote_file_id"], "dir-7");

    let requests = remote.received_requests().await.unwrap();
    let raw = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(raw.contains("filename=\"project.zip\""));
    assert!(raw.contains("name=\"owner\""));

    // The spool artifact is gone once the submission finishes.
    assert!(std::fs::read_dir(app.spool.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_missing_owner_header_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/api/v1/submit-file")
        .json(&json!({ "file_id": 1 }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_unconfigured_endpoint_is_config_error() {
    let app = spawn_app();

    let owner_dir = app.storage.path().join("alice");
    std::fs::create_dir_all(&owner_dir).unwrap();
    let file_path = owner_dir.join("notes.txt");
    std::fs::write(&file_path, b"contents").unwrap();

    let response = app
        .server
        .post("/api/v1/submit-file")
        .add_header("x-owner", "alice")
        .json(&json!({ "file_id": file_id(&file_path) }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "CONFIG_ERROR");
}
