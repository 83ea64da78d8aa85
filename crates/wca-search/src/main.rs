mod classify;
mod config;
mod error;
mod flag;
mod format;
mod model;
mod rules;
mod search;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use rules::RulesIndex;
use search::SearchEngine;
use server::WcaSearchServer;
use wca_common::wca_api::WcaClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting wca-search MCP server");

    let config = Config::from_env()?;
    info!(
        base_url = %config.client.base_url,
        regulations_path = %config.regulations_path,
        "configuration loaded"
    );

    let rules = RulesIndex::load(&config.regulations_path())?;
    if rules.is_empty() {
        warn!("regulations dataset is empty, get_regulation will never match");
    }
    info!(rules = rules.len(), "regulations loaded");

    let client = WcaClient::new(config.client.clone())?;
    info!(
        timeout_ms = client.config().timeout.as_millis(),
        "wca api client ready"
    );

    let search_engine = Arc::new(SearchEngine::new(
        Arc::new(client),
        Arc::new(rules),
        config.site(),
    ));
    let server = WcaSearchServer::new(search_engine);

    if let Ok(addr) = std::env::var("MCP_TCP_LISTEN_ADDR") {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
