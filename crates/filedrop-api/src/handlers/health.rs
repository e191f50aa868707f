//! Health check handler.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health probe response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Storage details.
    pub storage: StorageHealth,
}

/// Storage section of the health probe.
#[derive(Debug, Clone, Serialize)]
pub struct StorageHealth {
    /// Provider type name.
    pub provider: String,
    /// Whether the storage root is reachable.
    pub healthy: bool,
    /// Bytes stored, as the usage counter sees it.
    pub used_bytes: u64,
    /// Configured quota.
    pub quota_bytes: u64,
}

/// GET /_/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let healthy = match state.provider.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            false
        }
    };

    let used_bytes = if healthy {
        state.usage.get_total(false).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Cannot read storage usage");
            state.usage.cached()
        })
    } else {
        state.usage.cached()
    };

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: StorageHealth {
            provider: state.provider.provider_type().to_string(),
            healthy,
            used_bytes,
            quota_bytes: state.config.storage.quota_bytes,
        },
    })
}
