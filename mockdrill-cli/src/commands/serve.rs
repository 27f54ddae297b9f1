//! Serve command for running the mockdrill server

use anyhow::Result;
use clap::Args;
use mockdrill_server::{MockdrillServer, ServerConfig};
use tracing::info;

use crate::config::ConfigLoader;

/// Arguments for the serve command
///
/// Flags override values from the merged TOML configuration.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Base URL of an external question-bank API
    #[arg(long)]
    pub bank_url: Option<String>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let file_config = ConfigLoader::load()?;

    let config = ServerConfig {
        host: args.host.unwrap_or(file_config.server.host),
        port: args.port.unwrap_or(file_config.server.port),
        bank_url: args.bank_url.or(file_config.server.bank_url),
    };

    info!("Starting mockdrill server on {}:{}", config.host, config.port);
    if let Some(url) = &config.bank_url {
        info!("Using external question bank at {}", url);
    }

    let server = MockdrillServer::new(config);
    server.run().await?;

    Ok(())
}
