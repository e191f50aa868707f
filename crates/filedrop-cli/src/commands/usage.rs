//! Storage usage report.

use clap::Args;
use serde::Serialize;

use filedrop_core::config::AppConfig;
use filedrop_core::error::AppError;
use filedrop_core::types::format_size;

use crate::output::{self, OutputFormat};

/// Arguments for the usage command
#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Force a full rescan of the storage root
    #[arg(long)]
    pub recalc: bool,
}

#[derive(Debug, Serialize)]
struct UsageReport {
    root: String,
    used_bytes: u64,
    quota_bytes: u64,
    file_count: usize,
    over_quota: bool,
}

/// Execute the usage command
pub async fn execute(
    args: &UsageArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::open_state(config).await?;

    let used_bytes = state.usage.get_total(args.recalc).await?;
    let file_count = state
        .provider
        .list()
        .await?
        .iter()
        .filter(|e| e.is_file())
        .count();
    let quota_bytes = state.config.storage.quota_bytes;

    let report = UsageReport {
        root: state.config.storage.root_path.clone(),
        used_bytes,
        quota_bytes,
        file_count,
        over_quota: used_bytes > quota_bytes,
    };

    output::print_item(
        &report,
        &[
            ("Root", report.root.clone()),
            ("Used", format_size(used_bytes)),
            ("Quota", format_size(quota_bytes)),
            ("Files", file_count.to_string()),
        ],
        format,
    );
    if report.over_quota && format == OutputFormat::Table {
        output::print_warning("Storage is over quota; run `filedrop prune`.");
    }

    Ok(())
}
