//! `SiteContext` extractor: works out the public origin of the request.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use filedrop_core::config::ServerConfig;
use filedrop_service::context::RequestContext;

use crate::state::AppState;

/// Scheme and host the client used to reach the service.
#[derive(Debug, Clone)]
pub struct SiteContext(pub RequestContext);

impl SiteContext {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }

    /// Build the context from request parts.
    ///
    /// The scheme is `https` when forced by configuration or when a proxy
    /// sets `X-Forwarded-Proto: https`. The host comes from the `Host`
    /// header, then the request URI, then the bind address.
    pub fn from_parts(parts: &Parts, server: &ServerConfig) -> Self {
        let forwarded_https = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("https"));
        let scheme = if server.force_https || forwarded_https {
            "https"
        } else {
            "http"
        };

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .filter(|h| !h.is_empty())
            .map(String::from)
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| server.bind_address());

        Self(RequestContext::new(scheme, host))
    }
}

impl std::ops::Deref for SiteContext {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for SiteContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, &state.config.server))
    }
}
