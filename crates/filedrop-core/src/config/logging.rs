//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Raise the FileDrop crates to `debug` regardless of `level`.
    #[serde(default = "default_debug")]
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            debug: default_debug(),
        }
    }
}

impl LoggingConfig {
    /// Build the `EnvFilter` directive string for this configuration.
    pub fn filter_directive(&self) -> String {
        if self.debug {
            format!(
                "{},filedrop=debug,filedrop_storage=debug,filedrop_service=debug,filedrop_api=debug",
                self.level
            )
        } else {
            self.level.clone()
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_debug() -> bool {
    true
}
