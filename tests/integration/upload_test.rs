//! Integration tests for the index page and uploads.

mod helpers;

use axum::body::Body;
use http::{Request, StatusCode};

use helpers::{TestApp, link_in};

#[tokio::test]
async fn test_index_shows_instructions_and_usage() {
    let app = TestApp::new().await;
    app.write_aged("seed.bin", 1536, 10);

    let response = app.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    let page = response.text();
    assert!(page.contains("curl -F \"file=@/path/to/your/file.txt\" http://localhost:9418"));
    assert!(page.contains("The maximum allowed file size is 1 Mb."));
    assert!(page.contains("Storage used: 1.50 KB / 1000 B"));
}

#[tokio::test]
async fn test_upload_returns_download_link() {
    let app = TestApp::new().await;

    let response = app.upload("hello.txt", b"hello world").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text().trim(),
        "<pre>Access your file here: <a href=\"http://localhost:9418/hello.txt\">http://localhost:9418/hello.txt</a></pre>"
    );
    assert_eq!(app.stored_files(), vec!["hello.txt"]);
    assert_eq!(
        std::fs::read(app.root().join("hello.txt")).unwrap(),
        b"hello world"
    );
    assert_eq!(app.state.usage.cached(), 11);
}

#[tokio::test]
async fn test_forwarded_https_link() {
    let app = TestApp::new().await;
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header("Host", "files.example")
        .header("X-Forwarded-Proto", "https")
        .header(
            "Content-Type",
            "multipart/form-data; boundary=----filedrop-test-boundary",
        )
        .body(Body::from(helpers::multipart_body(&[(
            "file",
            Some("a.txt"),
            b"a".as_slice(),
        )])))
        .unwrap();

    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(link_in(&response.text()), "https://files.example/a.txt");
}

#[tokio::test]
async fn test_duplicate_upload_gets_suffix() {
    let app = TestApp::new().await;

    let first = app.upload("report.txt", b"first").await;
    let second = app.upload("report.txt", b"second").await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);

    let url = link_in(&second.text());
    let name = url.rsplit('/').next().unwrap();
    assert!(name.starts_with("report_"));
    assert!(name.ends_with(".txt"));
    assert_eq!(name.len(), "report_".len() + 6 + ".txt".len());

    let files = app.stored_files();
    assert_eq!(files.len(), 2);
    assert!(files.contains(&"report.txt".to_string()));
    assert!(files.contains(&name.to_string()));
    assert_eq!(app.state.usage.get_total(true).await.unwrap(), 11);
}

#[tokio::test]
async fn test_missing_file_field_redirects() {
    let app = TestApp::new().await;

    let response = app.post_form(&[("comment", None, b"no file here".as_slice())]).await;

    assert!(response.status.is_redirection());
    assert_eq!(response.header("location"), Some("/"));
    assert!(app.stored_files().is_empty());
    assert_eq!(app.state.usage.cached(), 0);
}

#[tokio::test]
async fn test_non_multipart_post_redirects() {
    let app = TestApp::new().await;
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header("Host", helpers::TEST_HOST)
        .body(Body::from("file=nope"))
        .unwrap();

    let response = app.send(req).await;

    assert!(response.status.is_redirection());
    assert_eq!(response.header("location"), Some("/"));
}

#[tokio::test]
async fn test_empty_or_unusable_filename_redirects() {
    let app = TestApp::new().await;

    for name in ["", "../..", "$$$"] {
        let response = app.upload(name, b"data").await;
        assert!(response.status.is_redirection(), "name {name:?}");
        assert_eq!(response.header("location"), Some("/"));
    }
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_filename_is_sanitized() {
    let app = TestApp::new().await;

    let response = app.upload("../../etc/my passwd", b"x").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(link_in(&response.text()), "http://localhost:9418/etc_my_passwd");
    assert_eq!(app.stored_files(), vec!["etc_my_passwd"]);
}

#[tokio::test]
async fn test_storage_full_is_413_and_writes_nothing() {
    let app = TestApp::with_storage(100, 1024 * 1024, true).await;

    let first = app.upload("a.bin", &[0u8; 60]).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.upload("b.bin", &[0u8; 50]).await;

    assert_eq!(second.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        second.text(),
        "<pre>Storage full. Cannot upload file (50 B).</pre>"
    );
    assert_eq!(app.stored_files(), vec!["a.bin"]);
    assert_eq!(app.state.usage.cached(), 60);
}

#[tokio::test]
async fn test_oversized_upload_is_413_before_write() {
    let app = TestApp::with_storage(10 * 1024 * 1024, 1024 * 1024, true).await;

    let response = app.upload("big.bin", &vec![0u8; 1024 * 1024 + 1]).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.text(),
        "<pre>The maximum allowed file size is 1 Mb.</pre>"
    );
    assert!(app.stored_files().is_empty());
    assert_eq!(app.state.usage.cached(), 0);
}

#[tokio::test]
async fn test_counter_matches_disk_after_many_uploads() {
    let app = TestApp::with_storage(100_000, 1024 * 1024, true).await;

    let mut expected = 0u64;
    for (i, size) in [10usize, 200, 3, 4096, 1, 77].into_iter().enumerate() {
        let response = app.upload(&format!("f{i}.bin"), &vec![1u8; size]).await;
        assert_eq!(response.status, StatusCode::OK);
        expected += size as u64;
    }

    assert_eq!(app.state.usage.cached(), expected);
    assert_eq!(app.state.usage.get_total(true).await.unwrap(), expected);
}

#[tokio::test]
async fn test_failed_write_is_500_without_details() {
    let app = TestApp::with_failing_writes().await;

    let response = app.upload("a.bin", &[0u8; 10]).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "<pre>Internal server error</pre>");
    assert!(app.stored_files().is_empty());
    assert_eq!(app.state.usage.cached(), 0);
}

#[tokio::test]
async fn test_upload_page_escapes_host() {
    let app = TestApp::new().await;
    let req = Request::builder()
        .method("GET")
        .uri("/")
        .header("Host", "files.example\"><b>")
        .body(Body::empty())
        .unwrap();

    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    let page = response.text();
    assert!(!page.contains("<b>"));
    assert!(page.contains("&lt;b&gt;"));
}
