//! Storage root, upload limit, and quota configuration.

use serde::{Deserialize, Serialize};

const MB: u64 = 1024 * 1024;

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Flat directory holding every uploaded file.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum request body size for a single upload (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Total bytes the storage root may hold (default 1 GB).
    #[serde(default = "default_quota")]
    pub quota_bytes: u64,
    /// Evict the oldest files after an upload pushes usage over the quota.
    #[serde(default = "default_true")]
    pub auto_delete: bool,
    /// Length of the random token appended to colliding file names.
    #[serde(default = "default_token_length")]
    pub name_token_length: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_upload_size_bytes: default_max_upload(),
            quota_bytes: default_quota(),
            auto_delete: true,
            name_token_length: default_token_length(),
        }
    }
}

impl StorageConfig {
    /// The upload limit in whole megabytes, as shown to users.
    pub fn max_upload_size_mb(&self) -> u64 {
        self.max_upload_size_bytes / MB
    }
}

fn default_root_path() -> String {
    "uploads".to_string()
}

fn default_max_upload() -> u64 {
    10 * MB
}

fn default_quota() -> u64 {
    1024 * MB
}

fn default_true() -> bool {
    true
}

fn default_token_length() -> usize {
    6
}
