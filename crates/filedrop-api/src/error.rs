//! Maps domain `AppError` to HTTP responses.
//!
//! Every error body is a `<pre>` block, matching the plain pages the
//! service renders elsewhere.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use filedrop_core::error::{AppError, ErrorKind};

use crate::pages::{ErrorPage, render_page};

/// Status code for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::CapacityExceeded | ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Storage | ErrorKind::Configuration | ErrorKind::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// HTTP-facing wrapper so handlers can return domain errors with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        let message = if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err, "Internal server error");
            "Internal server error"
        } else {
            err.message.as_str()
        };

        match render_page(&ErrorPage { message }) {
            Ok(body) => (status, body).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, message.to_string()).into_response()
            }
        }
    }
}
