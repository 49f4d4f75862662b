mod config;
mod error;
mod server;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use licensing_core::client::LicensingClient;
use licensing_core::orchestrator::AssessmentOrchestrator;
use server::LicensingAdvisorServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting licensing-advisor MCP server");

    let config = Config::from_env()?;
    info!(
        api_base = %config.api_base,
        timeout_secs = config.timeout.as_secs(),
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    let client = LicensingClient::new(config.client_config()).map_err(error::AppError::from)?;
    let orchestrator = Arc::new(AssessmentOrchestrator::new(client));

    match orchestrator.load_catalog().await {
        Ok(rules) => info!(rules, "catalog loaded"),
        Err(e) => warn!(error = %e, "starting without a catalog, rule details will be placeholders"),
    }

    let server = LicensingAdvisorServer::new(orchestrator);

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
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
