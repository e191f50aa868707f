//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

fn content_length(headers: &header::HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Logs method, path, status, body sizes and duration of every request.
///
/// Server errors are logged at `warn`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_bytes = content_length(request.headers()).unwrap_or(0);
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();
    let response_bytes = content_length(response.headers()).unwrap_or(0);

    if response.status().is_server_error() {
        warn!(%method, %path, status, request_bytes, response_bytes, duration_ms, "HTTP request failed");
    } else {
        info!(%method, %path, status, request_bytes, response_bytes, duration_ms, "HTTP request");
    }

    response
}
