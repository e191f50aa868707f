//! File download service: resolves a requested name and streams the file.

use std::sync::Arc;

use tracing::debug;

use filedrop_core::error::AppError;
use filedrop_core::traits::storage::{ByteStream, StorageProvider};
use filedrop_storage::secure_filename;

/// Handles anonymous downloads. Never mutates storage.
#[derive(Clone)]
pub struct DownloadService {
    /// Store files are read from.
    provider: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService").finish()
    }
}

/// Result containing file metadata and the content stream for a download.
pub struct DownloadResult {
    /// Stored name, used for Content-Disposition.
    pub filename: String,
    /// MIME type for Content-Type header.
    pub content_type: String,
    /// File size for Content-Length.
    pub size_bytes: u64,
    /// File content.
    pub stream: ByteStream,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Opens a stored file for download.
    ///
    /// The requested name goes through the same sanitization as uploads;
    /// anything that does not resolve to a regular file is `NotFound`.
    pub async fn download(&self, requested: &str) -> Result<DownloadResult, AppError> {
        let filename = secure_filename(requested);
        if filename.is_empty() {
            return Err(AppError::not_found(format!("File not found: {requested}")));
        }

        let meta = self.provider.metadata(&filename).await?;
        if !meta.is_file() {
            return Err(AppError::not_found(format!("File not found: {filename}")));
        }

        let stream = self.provider.read(&filename).await?;
        debug!(name = %filename, size = meta.size_bytes, "Serving download");

        Ok(DownloadResult {
            content_type: content_type_for(&filename)
                .unwrap_or("application/octet-stream")
                .to_string(),
            filename,
            size_bytes: meta.size_bytes,
            stream,
        })
    }
}

/// Guess a MIME type from a file name extension.
fn content_type_for(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "txt" | "log" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" | "gzip" => "application/gzip",
        "tar" => "application/x-tar",
        "7z" => "application/x-7z-compressed",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        _ => return None,
    };
    Some(mime)
}
