//! HTML pages served by the service, rendered from `templates/`.

use askama::Template;
use axum::response::Html;

use filedrop_core::error::AppError;

/// Index page with upload instructions and storage usage.
#[derive(Debug, Clone, Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    /// Site origin the curl examples point at.
    pub site_url: String,
    /// Single-upload limit in whole MiB.
    pub max_upload_mb: u64,
    /// Human-readable bytes stored.
    pub used: String,
    /// Human-readable quota.
    pub limit: String,
}

/// Body returned after a successful upload.
#[derive(Debug, Template)]
#[template(path = "upload_success.html")]
pub struct UploadSuccessPage<'a> {
    /// Public download URL.
    pub url: &'a str,
}

/// `<pre>` block every error response uses.
#[derive(Debug, Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub message: &'a str,
}

/// Render a page into an HTML response body.
pub fn render_page(page: &impl Template) -> Result<Html<String>, AppError> {
    page.render()
        .map(Html)
        .map_err(|e| AppError::internal(format!("Template render failed: {e}")))
}
