//! Oldest-first eviction to bring usage back under quota.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use filedrop_core::traits::storage::StorageProvider;

use crate::usage::UsageTracker;

/// A file removed by an eviction pass.
#[derive(Debug, Clone, Serialize)]
pub struct EvictedFile {
    /// Stored name.
    pub name: String,
    /// Bytes reclaimed.
    pub size_bytes: u64,
}

/// Outcome of one [`EvictionPolicy::free_space_if_needed`] call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvictionReport {
    /// Files deleted, oldest first.
    pub removed: Vec<EvictedFile>,
    /// Number of files whose deletion failed and were skipped.
    pub failed: usize,
    /// Running total after the pass.
    pub total_after: u64,
    /// Quota the pass worked against.
    pub quota_bytes: u64,
}

impl EvictionReport {
    /// Whether usage ended at or below the quota.
    pub fn is_within_quota(&self) -> bool {
        self.total_after <= self.quota_bytes
    }

    /// Total bytes reclaimed by the pass.
    pub fn reclaimed_bytes(&self) -> u64 {
        self.removed.iter().map(|f| f.size_bytes).sum()
    }
}

/// Deletes the oldest files (by modification time) while usage exceeds the quota.
#[derive(Debug)]
pub struct EvictionPolicy {
    /// Store files are evicted from.
    provider: Arc<dyn StorageProvider>,
    /// Usage counter kept in step with deletions.
    usage: Arc<UsageTracker>,
    /// Storage quota in bytes.
    quota_bytes: u64,
    /// Whether automatic eviction is enabled.
    enabled: bool,
}

impl EvictionPolicy {
    /// Create a new eviction policy.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        usage: Arc<UsageTracker>,
        quota_bytes: u64,
        enabled: bool,
    ) -> Self {
        Self {
            provider,
            usage,
            quota_bytes,
            enabled,
        }
    }

    /// The configured quota in bytes.
    pub fn quota_bytes(&self) -> u64 {
        self.quota_bytes
    }

    /// Whether automatic eviction is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Run the eviction pass if automatic eviction is enabled.
    ///
    /// Returns `None` when disabled.
    pub async fn free_space_if_needed(&self) -> Option<EvictionReport> {
        if !self.enabled {
            debug!("Auto-delete disabled, skipping eviction");
            return None;
        }
        Some(self.run().await)
    }

    /// Run the eviction pass unconditionally.
    ///
    /// Never fails: listing and delete errors are logged and reflected in
    /// the report.
    pub async fn run(&self) -> EvictionReport {
        let mut report = EvictionReport {
            quota_bytes: self.quota_bytes,
            ..Default::default()
        };

        let mut total = match self.usage.get_total(false).await {
            Ok(total) => total,
            Err(e) => {
                warn!(error = %e, "Cannot read storage usage, skipping eviction");
                report.total_after = self.usage.cached();
                return report;
            }
        };
        report.total_after = total;

        if total <= self.quota_bytes {
            return report;
        }

        let mut files = match self.provider.list().await {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| e.is_file())
                .collect::<Vec<_>>(),
            Err(e) => {
                warn!(error = %e, "Cannot list storage root, skipping eviction");
                return report;
            }
        };
        // Stable sort: equal timestamps keep enumeration order.
        files.sort_by_key(|f| f.last_modified);

        for file in files {
            if total <= self.quota_bytes {
                break;
            }

            match self.provider.delete(&file.name).await {
                Ok(()) => {
                    total = total.saturating_sub(file.size_bytes);
                    self.usage.subtract(file.size_bytes);
                    info!(
                        name = %file.name,
                        size = file.size_bytes,
                        total_bytes = total,
                        "Auto-removed file"
                    );
                    report.removed.push(EvictedFile {
                        name: file.name,
                        size_bytes: file.size_bytes,
                    });
                }
                Err(e) => {
                    warn!(name = %file.name, error = %e, "Cannot delete file during eviction");
                    report.failed += 1;
                }
            }
        }

        report.total_after = total;
        if !report.is_within_quota() {
            warn!(
                total_bytes = total,
                quota_bytes = self.quota_bytes,
                "Storage still over quota after eviction"
            );
        }

        report
    }
}
