//! Start the FileDrop server.

use clap::Args;

use filedrop_core::config::AppConfig;
use filedrop_core::error::AppError;
use filedrop_core::types::format_size;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the storage root
    #[arg(long)]
    pub root: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref root) = args.root {
        config.storage.root_path = root.clone();
    }
    config.validate()?;

    println!("Starting FileDrop server...");
    println!("  Address: {}", config.server.bind_address());
    println!("  Storage: {}", config.storage.root_path);
    println!("  Quota:   {}", format_size(config.storage.quota_bytes));

    filedrop_api::run_server(config).await
}
