//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use http::{HeaderMap, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use filedrop_api::AppState;
use filedrop_core::config::{AppConfig, StorageConfig};
use filedrop_core::error::AppError;
use filedrop_core::result::AppResult;
use filedrop_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};
use filedrop_storage::LocalStorageProvider;

/// Host every test request claims to be addressed to.
pub const TEST_HOST: &str = "localhost:9418";

const BOUNDARY: &str = "----filedrop-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for poking at the usage counter and eviction directly
    pub state: AppState,
    /// Scratch storage root, removed on drop
    pub dir: TempDir,
}

/// A response with its body fully read.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub body: Bytes,
}

impl TestResponse {
    /// Body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Body is not JSON")
    }

    /// A header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Default limits: 1000-byte quota, 1 MiB uploads, auto-delete on.
    pub async fn new() -> Self {
        Self::with_storage(1000, 1024 * 1024, true).await
    }

    /// Create an app over a fresh temp directory.
    pub async fn with_storage(quota_bytes: u64, max_upload_size_bytes: u64, auto_delete: bool) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&dir, quota_bytes, max_upload_size_bytes, auto_delete);

        let state = AppState::initialize(config)
            .await
            .expect("Failed to initialize state");
        let router = filedrop_api::build_app(state.clone());

        Self { router, state, dir }
    }

    /// Default limits over a store that rejects every write.
    pub async fn with_failing_writes() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&dir, 1000, 1024 * 1024, true);
        let inner = LocalStorageProvider::new(&config.storage.root_path)
            .await
            .expect("Failed to create provider");

        let state = AppState::new(config, Arc::new(FailingWrites { inner }));
        let router = filedrop_api::build_app(state.clone());

        Self { router, state, dir }
    }

    /// Storage root on disk.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Names of the regular files in the storage root, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.root())
            .expect("Failed to read storage root")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Write a file straight to disk with its mtime `age_secs` in the past.
    pub fn write_aged(&self, name: &str, size: usize, age_secs: u64) {
        let path = self.root().join(name);
        std::fs::write(&path, vec![b'o'; size]).expect("Failed to write file");
        std::fs::OpenOptions::new()
            .write(true)
            .open(&path)
            .expect("Failed to open file")
            .set_modified(SystemTime::now() - Duration::from_secs(age_secs))
            .expect("Failed to set mtime");
    }

    /// Send a request through the router.
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// GET a path.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .header("Host", TEST_HOST)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    /// POST a multipart form with one `file` field.
    pub async fn upload(&self, filename: &str, data: &[u8]) -> TestResponse {
        self.post_form(&[("file", Some(filename), data)]).await
    }

    /// POST a multipart form built from `(field, filename, data)` parts.
    pub async fn post_form(&self, parts: &[(&str, Option<&str>, &[u8])]) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("Host", TEST_HOST)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .expect("Failed to build request");
        self.send(req).await
    }
}

fn test_config(dir: &TempDir, quota_bytes: u64, max_upload_size_bytes: u64, auto_delete: bool) -> AppConfig {
    AppConfig {
        storage: StorageConfig {
            root_path: dir.path().to_string_lossy().into_owned(),
            quota_bytes,
            max_upload_size_bytes,
            auto_delete,
            ..StorageConfig::default()
        },
        ..AppConfig::default()
    }
}

/// Local store whose writes always fail, as on a full disk.
#[derive(Debug)]
struct FailingWrites {
    inner: LocalStorageProvider,
}

#[async_trait]
impl StorageProvider for FailingWrites {
    fn provider_type(&self) -> &str {
        "failing-writes"
    }
    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
    async fn read(&self, name: &str) -> AppResult<ByteStream> {
        self.inner.read(name).await
    }
    async fn write(&self, name: &str, _data: Bytes) -> AppResult<()> {
        Err(AppError::storage(format!("No space left on device: {name}")))
    }
    async fn delete(&self, name: &str) -> AppResult<()> {
        self.inner.delete(name).await
    }
    async fn exists(&self, name: &str) -> AppResult<bool> {
        self.inner.exists(name).await
    }
    async fn metadata(&self, name: &str) -> AppResult<StorageObjectMeta> {
        self.inner.metadata(name).await
    }
    async fn list(&self) -> AppResult<Vec<StorageObjectMeta>> {
        self.inner.list().await
    }
}

/// Encode a multipart/form-data body.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Pull the download URL out of an upload response.
pub fn link_in(body: &str) -> String {
    let start = body.find("href=\"").expect("No link in body") + "href=\"".len();
    let end = body[start..].find('"').expect("Unterminated link") + start;
    body[start..end].to_string()
}
