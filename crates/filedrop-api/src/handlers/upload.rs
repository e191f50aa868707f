//! Upload handler: multipart form field `file`.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use filedrop_core::error::{AppError, ErrorKind};
use filedrop_service::file::upload::{UploadParams, upload_limit_message};

use crate::error::ApiError;
use crate::extractors::SiteContext;
use crate::pages::{UploadSuccessPage, render_page};
use crate::state::AppState;

/// POST /
///
/// Anything without a usable file (no multipart body, no `file` field, an
/// empty or unusable file name) is sent back to the index page.
pub async fn upload(
    State(state): State<AppState>,
    site: SiteContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let Ok(mut multipart) = multipart else {
        debug!("Upload without a multipart body, redirecting");
        return Ok(back_to_index());
    };

    let mut params: Option<UploadParams> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(&state, e))?;
        params = Some(UploadParams { file_name, data });
        break;
    }

    let Some(params) = params.filter(|p| !p.file_name.is_empty()) else {
        debug!("Upload without a named file field, redirecting");
        return Ok(back_to_index());
    };

    match state.upload_service.upload(site.context(), params).await {
        Ok(receipt) => {
            let page = render_page(&UploadSuccessPage { url: &receipt.url })?;
            Ok(page.into_response())
        }
        Err(e) if e.is(ErrorKind::Validation) => {
            debug!(error = %e, "Unusable upload, redirecting");
            Ok(back_to_index())
        }
        Err(e) => Err(e.into()),
    }
}

fn back_to_index() -> Response {
    Redirect::to("/").into_response()
}

/// Body-limit failures surface while the multipart stream is read.
fn multipart_error(state: &AppState, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(upload_limit_message(&state.config.storage))
    } else {
        AppError::validation(format!("Multipart error: {}", err.body_text()))
    }
}
