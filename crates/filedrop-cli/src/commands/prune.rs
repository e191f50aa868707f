//! Run the eviction pass once.

use clap::Args;

use filedrop_core::config::AppConfig;
use filedrop_core::error::AppError;
use filedrop_core::types::format_size;

use crate::output::{self, OutputFormat};

/// Arguments for the prune command
#[derive(Debug, Args)]
pub struct PruneArgs {
    /// Evict even when `storage.auto_delete` is off
    #[arg(long)]
    pub force: bool,
}

/// Execute the prune command
pub async fn execute(
    args: &PruneArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::open_state(config).await?;

    let report = if args.force {
        state.eviction.run().await
    } else {
        match state.eviction.free_space_if_needed().await {
            Some(report) => report,
            None => {
                output::print_warning("Auto-delete is disabled; pass --force to prune anyway.");
                return Ok(());
            }
        }
    };

    if format == OutputFormat::Json {
        output::print_item(&report, &[], format);
        return Ok(());
    }

    for file in &report.removed {
        output::print_kv(&file.name, &format_size(file.size_bytes));
    }
    output::print_success(&format!(
        "Removed {} file(s), reclaimed {}; now {} of {}",
        report.removed.len(),
        format_size(report.reclaimed_bytes()),
        format_size(report.total_after),
        format_size(report.quota_bytes)
    ));
    if report.failed > 0 {
        output::print_warning(&format!("{} file(s) could not be deleted", report.failed));
    }
    if !report.is_within_quota() {
        output::print_warning("Storage is still over quota");
    }

    Ok(())
}
