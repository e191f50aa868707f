//! Running total of bytes held in the storage root.
//!
//! The filesystem is the source of truth; [`UsageTracker`] caches the sum of
//! all regular file sizes and keeps it convergent through paired
//! [`UsageTracker::add`] / [`UsageTracker::subtract`] calls. A cached value of
//! zero is treated as "never computed" and triggers a rescan, even when the
//! store really is empty.

use std::sync::{Arc, Mutex};

use tracing::debug;

use filedrop_core::result::AppResult;
use filedrop_core::traits::storage::StorageProvider;

/// Cached storage usage counter.
///
/// The mutex guards only the in-memory arithmetic; directory scans run
/// without holding it.
#[derive(Debug)]
pub struct UsageTracker {
    /// Provider whose root is scanned on recompute.
    provider: Arc<dyn StorageProvider>,
    /// Cached total in bytes; `0` means cold.
    total: Mutex<u64>,
}

impl UsageTracker {
    /// Create a cold tracker over the given provider.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self {
            provider,
            total: Mutex::new(0),
        }
    }

    /// Return the total bytes stored.
    ///
    /// Recomputes from disk when `force_recalc` is set or the cache is cold,
    /// then stores the fresh value.
    pub async fn get_total(&self, force_recalc: bool) -> AppResult<u64> {
        if !force_recalc {
            let cached = self.cached();
            if cached != 0 {
                return Ok(cached);
            }
        }

        let scanned = self.scan().await?;
        {
            let mut total = self.total.lock().unwrap_or_else(|e| e.into_inner());
            *total = scanned;
        }

        debug!(total_bytes = scanned, force_recalc, "Recomputed storage usage");
        Ok(scanned)
    }

    /// Increment the cached total. Never triggers a recompute.
    pub fn add(&self, delta: u64) {
        let mut total = self.total.lock().unwrap_or_else(|e| e.into_inner());
        *total = total.saturating_add(delta);
    }

    /// Decrement the cached total.
    ///
    /// Saturates at zero, which leaves the cache cold so the next read
    /// rescans the disk.
    pub fn subtract(&self, delta: u64) {
        let mut total = self.total.lock().unwrap_or_else(|e| e.into_inner());
        *total = total.saturating_sub(delta);
    }

    /// The cached value without any recompute.
    pub fn cached(&self) -> u64 {
        *self.total.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sum the sizes of every regular file directly inside the root.
    pub async fn scan(&self) -> AppResult<u64> {
        let entries = self.provider.list().await?;
        Ok(entries
            .iter()
            .filter(|e| e.is_file())
            .map(|e| e.size_bytes)
            .sum())
    }
}
