//! CLI command definitions and dispatch.

pub mod files;
pub mod prune;
pub mod serve;
pub mod usage;

use clap::{Parser, Subcommand};

use filedrop_api::AppState;
use filedrop_core::config::AppConfig;
use filedrop_core::error::AppError;

use crate::output::OutputFormat;

/// FileDrop: anonymous file hosting
#[derive(Debug, Parser)]
#[command(name = "filedrop", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment overlay to load (defaults to `FILEDROP_ENV`, then `development`)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the FileDrop server
    Serve(serve::ServeArgs),
    /// Show storage usage against the quota
    Usage(usage::UsageArgs),
    /// List stored files, oldest first
    Files,
    /// Run one eviction pass
    Prune(prune::PruneArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Usage(args) => usage::execute(args, config, self.format).await,
            Commands::Files => files::execute(config, self.format).await,
            Commands::Prune(args) => prune::execute(args, config, self.format).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        let env = self
            .env
            .clone()
            .or_else(|| std::env::var("FILEDROP_ENV").ok())
            .unwrap_or_else(|| "development".to_string());
        AppConfig::load_from(&self.config, &env)
    }
}

/// Helper: open the configured storage root
pub async fn open_state(config: AppConfig) -> Result<AppState, AppError> {
    AppState::initialize(config).await
}
