//! Application builder: wires router + middleware + state into an Axum app.

use std::time::Duration;

use axum::Router;

use filedrop_core::config::AppConfig;
use filedrop_core::error::AppError;
use filedrop_core::types::format_size;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the FileDrop server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FileDrop server...");

    // ── Step 1: Storage root and accounting ──────────────────────
    let state = AppState::initialize(config).await?;
    let used = state.usage.get_total(true).await?;
    tracing::info!(
        root = %state.config.storage.root_path,
        used = %format_size(used),
        quota = %format_size(state.config.storage.quota_bytes),
        auto_delete = state.config.storage.auto_delete,
        "Storage ready"
    );

    // ── Step 2: Bind and serve ───────────────────────────────────
    let addr = state.config.server.bind_address();
    let grace = Duration::from_secs(state.config.server.shutdown_grace_seconds);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("FileDrop server listening on {}", addr);

    let server = async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    };

    // In-flight requests get `grace` to finish once shutdown starts.
    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, exiting");
        }
    }

    tracing::info!("FileDrop server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
