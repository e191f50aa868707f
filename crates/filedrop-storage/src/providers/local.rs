//! Local filesystem storage provider.

use std::fs::Metadata;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::debug;

use filedrop_core::error::{AppError, ErrorKind};
use filedrop_core::result::AppResult;
use filedrop_core::traits::storage::{ByteStream, EntryKind, StorageObjectMeta, StorageProvider};

/// Local filesystem storage provider over a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    ///
    /// The directory is created if it does not exist yet.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The storage root directory.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Resolve a stored name to a path directly inside the root.
    fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(AppError::validation(format!("Invalid file name: {name:?}")));
        }
        Ok(self.root.join(name))
    }
}

/// Build object metadata from filesystem metadata.
fn object_meta(name: String, meta: &Metadata) -> StorageObjectMeta {
    let kind = if meta.is_file() {
        EntryKind::File
    } else if meta.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::Other
    };

    StorageObjectMeta {
        name,
        size_bytes: meta.len(),
        last_modified: meta.modified().ok().map(chrono::DateTime::<chrono::Utc>::from),
        kind,
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read(&self, name: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(name)?;
        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open file: {name}"),
                    e,
                )
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn write(&self, name: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(name)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    AppError::conflict(format!("File already exists: {name}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create file: {name}"),
                        e,
                    )
                }
            })?;

        let written = async {
            file.write_all(&data).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            // A partial file would be picked up by the next usage scan.
            drop(file);
            let _ = fs::remove_file(&full_path).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {name}"),
                e,
            ));
        }

        debug!(name, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let full_path = self.resolve(name)?;
        fs::remove_file(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete file: {name}"),
                    e,
                )
            }
        })?;
        debug!(name, "Deleted file");
        Ok(())
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        let full_path = self.resolve(name)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to check existence: {name}"),
                e,
            )
        })
    }

    async fn metadata(&self, name: &str) -> AppResult<StorageObjectMeta> {
        let full_path = self.resolve(name)?;
        let meta = fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to get metadata: {name}"),
                    e,
                )
            }
        })?;

        Ok(object_meta(name.to_string(), &meta))
    }

    async fn list(&self) -> AppResult<Vec<StorageObjectMeta>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list directory: {}", self.root.display()),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let name = entry.file_name().to_string_lossy().to_string();

            // Follows symlinks, so a link to a regular file counts as one.
            let meta = match fs::metadata(entry.path()).await {
                Ok(meta) => meta,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(name, "Entry vanished or dangling during listing");
                    continue;
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to get entry metadata: {name}"),
                        e,
                    ));
                }
            };

            entries.push(object_meta(name, &meta));
        }

        Ok(entries)
    }
}
