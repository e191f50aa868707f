//! File upload service: capacity check, naming, write, accounting, eviction.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};

use filedrop_core::config::StorageConfig;
use filedrop_core::error::{AppError, ErrorKind};
use filedrop_core::traits::storage::StorageProvider;
use filedrop_core::types::format_size;
use filedrop_storage::{EvictionPolicy, EvictionReport, NameResolver, UsageTracker, secure_filename};

use crate::context::RequestContext;

/// Message shown when a request exceeds the single-upload limit.
pub fn upload_limit_message(config: &StorageConfig) -> String {
    format!(
        "The maximum allowed file size is {} Mb.",
        config.max_upload_size_mb()
    )
}

/// Upload parameters (single request with full file body).
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// File name as sent by the client, before sanitization.
    pub file_name: String,
    /// File content bytes.
    pub data: Bytes,
}

/// Result of a stored upload.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    /// Name the file was stored under.
    pub file_name: String,
    /// Size of the stored file in bytes.
    pub size_bytes: u64,
    /// Public download URL.
    pub url: String,
    /// Eviction pass run after the write, if auto-delete is enabled.
    pub eviction: Option<EvictionReport>,
}

/// Handles anonymous single-request uploads.
#[derive(Clone)]
pub struct UploadService {
    /// Store uploads are written to.
    provider: Arc<dyn StorageProvider>,
    /// Usage counter.
    usage: Arc<UsageTracker>,
    /// Post-upload eviction.
    eviction: Arc<EvictionPolicy>,
    /// Collision-free naming.
    resolver: NameResolver,
    /// Storage configuration.
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("quota_bytes", &self.config.quota_bytes)
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        usage: Arc<UsageTracker>,
        eviction: Arc<EvictionPolicy>,
        config: StorageConfig,
    ) -> Self {
        let resolver = NameResolver::new(Arc::clone(&provider), config.name_token_length);
        Self {
            provider,
            usage,
            eviction,
            resolver,
            config,
        }
    }

    /// Stores an upload and returns its public URL.
    ///
    /// Fails with `Validation` when the name sanitizes to nothing,
    /// `PayloadTooLarge` over the single-upload limit, and
    /// `CapacityExceeded` when the quota would be exceeded. None of those
    /// touch the disk or the usage counter. A name claimed by a concurrent
    /// upload between resolution and write gets one suffixed retry. Only the
    /// write itself can fail with a storage error.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        params: UploadParams,
    ) -> Result<UploadReceipt, AppError> {
        let file_name = secure_filename(&params.file_name);
        if file_name.is_empty() {
            return Err(AppError::validation("No usable file name"));
        }

        let size_bytes = params.data.len() as u64;
        if size_bytes > self.config.max_upload_size_bytes {
            return Err(AppError::payload_too_large(upload_limit_message(
                &self.config,
            )));
        }

        let used = self.usage.get_total(false).await?;
        if used.saturating_add(size_bytes) > self.config.quota_bytes {
            warn!(
                name = %file_name,
                size = size_bytes,
                used_bytes = used,
                quota_bytes = self.config.quota_bytes,
                "Upload rejected, storage full"
            );
            return Err(AppError::capacity_exceeded(format!(
                "Storage full. Cannot upload file ({}).",
                format_size(size_bytes)
            )));
        }

        let mut stored_name = self.resolver.resolve(&file_name).await?;

        match self.provider.write(&stored_name, params.data.clone()).await {
            Ok(()) => {}
            Err(e) if e.is(ErrorKind::Conflict) => {
                // Another upload took the name after it was resolved.
                stored_name = self.resolver.suffixed(&file_name);
                debug!(requested = %file_name, name = %stored_name, "Name claimed concurrently, retrying");
                self.provider.write(&stored_name, params.data).await?;
            }
            Err(e) => return Err(e),
        }
        self.usage.add(size_bytes);

        info!(
            name = %stored_name,
            size = size_bytes,
            "Upload stored"
        );

        let eviction = self.eviction.free_space_if_needed().await;

        Ok(UploadReceipt {
            url: ctx.file_url(&stored_name),
            file_name: stored_name,
            size_bytes,
            eviction,
        })
    }
}
