//! List stored files in eviction order.

use serde::Serialize;
use tabled::Tabled;

use filedrop_core::config::AppConfig;
use filedrop_core::error::AppError;
use filedrop_core::types::format_size;

use crate::output::{self, OutputFormat};

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// Stored name
    name: String,
    /// Size in bytes
    #[tabled(skip)]
    size_bytes: u64,
    /// Human-readable size
    #[serde(skip)]
    size: String,
    /// Last modified
    modified: String,
}

/// Execute the files command
pub async fn execute(config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = super::open_state(config).await?;

    let mut files: Vec<_> = state
        .provider
        .list()
        .await?
        .into_iter()
        .filter(|e| e.is_file())
        .collect();
    files.sort_by_key(|f| f.last_modified);

    let rows: Vec<FileRow> = files
        .into_iter()
        .map(|f| FileRow {
            size: format_size(f.size_bytes),
            size_bytes: f.size_bytes,
            modified: f
                .last_modified
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
            name: f.name,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
