//! Index page handler.

use axum::extract::State;
use axum::response::Html;

use filedrop_core::types::format_size;

use crate::error::ApiError;
use crate::extractors::SiteContext;
use crate::pages::{IndexPage, render_page};
use crate::state::AppState;

/// GET /
pub async fn index(
    State(state): State<AppState>,
    site: SiteContext,
) -> Result<Html<String>, ApiError> {
    let used = state.usage.get_total(false).await?;
    let storage = &state.config.storage;

    let page = IndexPage {
        site_url: site.site_url(),
        max_upload_mb: storage.max_upload_size_mb(),
        used: format_size(used),
        limit: format_size(storage.quota_bytes),
    };

    Ok(render_page(&page)?)
}
