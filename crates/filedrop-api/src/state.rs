//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use filedrop_core::config::AppConfig;
use filedrop_core::result::AppResult;
use filedrop_core::traits::storage::StorageProvider;
use filedrop_service::{DownloadService, UploadService};
use filedrop_storage::{EvictionPolicy, LocalStorageProvider, UsageTracker};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Storage ──────────────────────────────────────────────
    /// The flat file store
    pub provider: Arc<dyn StorageProvider>,
    /// Cached usage counter, the single authority on bytes stored
    pub usage: Arc<UsageTracker>,
    /// Oldest-first eviction
    pub eviction: Arc<EvictionPolicy>,

    // ── Services ─────────────────────────────────────────────
    /// Upload orchestration
    pub upload_service: Arc<UploadService>,
    /// Download lookup
    pub download_service: Arc<DownloadService>,
}

impl AppState {
    /// Wire the state around an existing provider.
    pub fn new(config: AppConfig, provider: Arc<dyn StorageProvider>) -> Self {
        let usage = Arc::new(UsageTracker::new(Arc::clone(&provider)));
        let eviction = Arc::new(EvictionPolicy::new(
            Arc::clone(&provider),
            Arc::clone(&usage),
            config.storage.quota_bytes,
            config.storage.auto_delete,
        ));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&provider),
            Arc::clone(&usage),
            Arc::clone(&eviction),
            config.storage.clone(),
        ));
        let download_service = Arc::new(DownloadService::new(Arc::clone(&provider)));

        Self {
            config: Arc::new(config),
            provider,
            usage,
            eviction,
            upload_service,
            download_service,
        }
    }

    /// Create the storage root named in the configuration and wire the state.
    pub async fn initialize(config: AppConfig) -> AppResult<Self> {
        let provider = LocalStorageProvider::new(&config.storage.root_path).await?;
        Ok(Self::new(config, Arc::new(provider)))
    }
}
