//! Automatisch MCP Server Binary
//!
//! ## Usage
//!
//! ```bash
//! # Run as MCP server (stdio)
//! automatisch-mcp-server
//!
//! # Against a remote instance
//! AUTOMATISCH_BASE_URL=https://automatisch.example.com \
//! AUTOMATISCH_API_KEY=... automatisch-mcp-server
//! ```

use std::sync::Arc;

use automatisch_client::HttpBackend;
use automatisch_mcp::{Cli, Dispatcher, McpServer};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "automatisch_mcp=info,automatisch_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.client_config();

    tracing::info!(
        "Starting {} v{} against {}",
        automatisch_mcp::SERVER_NAME,
        automatisch_mcp::SERVER_VERSION,
        config.base_url
    );
    if !config.is_authenticated() {
        tracing::warn!("AUTOMATISCH_API_KEY is empty; requests will be sent without credentials");
    }

    let backend = HttpBackend::new(&config)?;
    let server = Arc::new(McpServer::new(Dispatcher::new(Arc::new(backend))));

    tracing::info!("MCP server ready, listening on stdio");
    server.run_stdio().await?;

    tracing::info!("Input closed, shutting down");
    Ok(())
}
