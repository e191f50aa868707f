//! File name sanitization and collision-free name resolution.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use filedrop_core::result::AppResult;
use filedrop_core::traits::storage::StorageProvider;

/// Characters random name tokens are drawn from.
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Reduce a client-supplied file name to a safe, flat name.
///
/// Non-ASCII characters are dropped, path separators become spaces,
/// whitespace runs collapse to a single `_`, anything outside
/// `[A-Za-z0-9_.-]` is removed, and leading/trailing `.` and `_` are
/// stripped. Returns an empty string when nothing usable remains.
pub fn secure_filename(raw: &str) -> String {
    let ascii: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Split a name into stem and extension (extension keeps its dot).
///
/// Leading dots never start an extension, so `.profile` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Generate a random token of the given length.
pub fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Picks the name an upload is stored under.
///
/// Makes a single attempt: a name that collides gets one random suffix,
/// and that candidate is not checked again.
#[derive(Debug, Clone)]
pub struct NameResolver {
    /// Store checked for existing names.
    provider: Arc<dyn StorageProvider>,
    /// Length of the random suffix token.
    token_length: usize,
}

impl NameResolver {
    /// Create a new resolver.
    pub fn new(provider: Arc<dyn StorageProvider>, token_length: usize) -> Self {
        Self {
            provider,
            token_length,
        }
    }

    /// Return `requested` if it is free, otherwise `<stem>_<token><ext>`.
    pub async fn resolve(&self, requested: &str) -> AppResult<String> {
        if !self.provider.exists(requested).await? {
            return Ok(requested.to_string());
        }

        let candidate = self.suffixed(requested);
        debug!(requested, candidate = %candidate, "Name taken, using suffixed name");
        Ok(candidate)
    }

    /// `<stem>_<token><ext>` for the given name, without checking the store.
    pub fn suffixed(&self, requested: &str) -> String {
        let (stem, ext) = split_extension(requested);
        format!("{stem}_{}{ext}", random_token(self.token_length))
    }
}
