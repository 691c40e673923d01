//! stocky-mcp: stock image search MCP server.

use std::sync::Arc;

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use stocky::config::StockyConfig;
use stocky::manager::StockImageManager;
use stocky::mcp::StockyServer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the MCP protocol.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stocky=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Starting Stocky MCP server...");

    let config = StockyConfig::from_env();
    let manager = Arc::new(StockImageManager::from_config(config));

    let server = StockyServer::new(manager);
    let service = server.serve(stdio()).await?;

    info!("Stocky MCP server ready, waiting for requests");

    service.waiting().await?;

    info!("Stocky MCP server shutting down");
    Ok(())
}
