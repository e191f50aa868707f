//! Download handler.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use filedrop_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Content-Disposition value for a stored name.
///
/// Stored names are already reduced to `[A-Za-z0-9_.-]`, so they can be
/// quoted as they are.
fn content_disposition_header(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

/// GET /{*filename}
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.download_service.download(&filename).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&result.filename),
        )
        .header(header::CONTENT_LENGTH, result.size_bytes)
        .body(Body::from_stream(result.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
