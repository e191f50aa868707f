//! Integration tests for downloads and the health probe.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, link_in};

#[tokio::test]
async fn test_download_uploaded_file_as_attachment() {
    let app = TestApp::new().await;
    let upload = app.upload("notes.txt", b"remember the milk").await;
    let url = link_in(&upload.text());
    let path = url.trim_start_matches("http://localhost:9418");

    let response = app.get(path).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"notes.txt\"")
    );
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.header("content-length"), Some("17"));
    assert_eq!(&response.body[..], b"remember the milk");
}

#[tokio::test]
async fn test_unknown_extension_is_octet_stream() {
    let app = TestApp::new().await;
    app.write_aged("blob.xyz", 4, 0);

    let response = app.get("/blob.xyz").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-type"),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let app = TestApp::new().await;

    let response = app.get("/nothing-here.txt").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.text().starts_with("<pre>"));
}

#[tokio::test]
async fn test_nested_path_is_flattened() {
    let app = TestApp::new().await;
    app.write_aged("docs_readme.md", 3, 0);

    let response = app.get("/docs/readme.md").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"docs_readme.md\"")
    );
}

#[tokio::test]
async fn test_directory_is_not_served() {
    let app = TestApp::new().await;
    std::fs::create_dir(app.root().join("subdir")).unwrap();

    let response = app.get("/subdir").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_does_not_touch_accounting() {
    let app = TestApp::new().await;
    app.upload("a.bin", &[7u8; 40]).await;
    let before = app.state.usage.cached();

    for _ in 0..3 {
        assert_eq!(app.get("/a.bin").await.status, StatusCode::OK);
    }

    assert_eq!(app.state.usage.cached(), before);
    assert_eq!(app.stored_files(), vec!["a.bin"]);
}

#[tokio::test]
async fn test_health_reports_storage() {
    let app = TestApp::new().await;
    app.upload("a.bin", &[1u8; 25]).await;

    let response = app.get("/_/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"]["provider"], "local");
    assert_eq!(body["storage"]["healthy"], true);
    assert_eq!(body["storage"]["used_bytes"], 25);
    assert_eq!(body["storage"]["quota_bytes"], 1000);
}
