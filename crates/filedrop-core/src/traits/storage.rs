//! Storage provider trait for the flat file store.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// What kind of directory entry a stored object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A regular file. Only these count towards usage.
    File,
    /// A subdirectory.
    Directory,
    /// Anything else (socket, fifo, device, dangling link).
    Other,
}

/// Metadata about a stored object.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StorageObjectMeta {
    /// Name of the object inside the storage root.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp, the eviction ordering key.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// Entry kind.
    pub kind: EntryKind,
}

impl StorageObjectMeta {
    /// Whether this object is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for file storage backends.
///
/// Objects are addressed by a single, already-sanitized name; the store is
/// flat. Providers never hold file handles beyond a single call, except for
/// the stream returned by [`StorageProvider::read`].
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Open a file and return its byte stream.
    async fn read(&self, name: &str) -> AppResult<ByteStream>;

    /// Create the named file with the given bytes.
    ///
    /// Never replaces an existing entry: a taken name fails with `Conflict`.
    async fn write(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Delete the named file. Fails if it does not exist.
    async fn delete(&self, name: &str) -> AppResult<()>;

    /// Check whether an entry with the given name exists.
    async fn exists(&self, name: &str) -> AppResult<bool>;

    /// Get metadata about a single entry.
    async fn metadata(&self, name: &str) -> AppResult<StorageObjectMeta>;

    /// List every entry directly inside the storage root, in enumeration order.
    async fn list(&self) -> AppResult<Vec<StorageObjectMeta>>;
}
