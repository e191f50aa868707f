//! Request context carrying the public origin of the current request.

use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Built by the HTTP layer and passed into service methods so download
/// links point back at the host the client actually talked to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// `http` or `https`.
    pub scheme: String,
    /// Host (and optional port) as seen by the client.
    pub host: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// The site origin, e.g. `http://files.example:9418`.
    pub fn site_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// The public URL of a stored file.
    pub fn file_url(&self, name: &str) -> String {
        format!("{}/{}", self.site_url(), name)
    }
}
