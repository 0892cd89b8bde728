use anyhow::Context;
use donpapi_mcp::{
    AdapterConfig, DonpapiServer, DonpapiTools, PlatformProcessManagerFactory,
    ProcessManagerFactory, logging,
};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::sync::Arc;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(start())
}

/// Serves the DonPAPI tools over stdio until the client disconnects or SIGINT.
async fn start() -> anyhow::Result<()> {
    logging::init(logging::json_requested())?;

    let config = AdapterConfig::from_env().context("Failed to read configuration")?;
    info!(
        platform = PlatformProcessManagerFactory::platform_name(),
        config = %serde_json::to_string(&config)?,
        "Starting donpapi-mcp"
    );

    let process_manager = Arc::new(PlatformProcessManagerFactory::create_process_manager());
    let tools = Arc::new(DonpapiTools::new(&config, process_manager));

    let service = DonpapiServer::new(tools.clone(), &config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            error!("serving error: {:?}", e);
        })?;

    tokio::select! {
        quit = service.waiting() => {
            info!("MCP session ended: {:?}", quit?);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    tools.shutdown().await;
    Ok(())
}
