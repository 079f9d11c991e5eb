//! HTTP service command

use super::helpers;
use contextifyer_core::{
    api::{ApiServer, ApiServerConfig},
    error::{ContextifyerError, Result},
    Settings,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Handle server startup command
pub async fn handle(settings: Settings, addr: Option<String>) -> Result<()> {
    debug!("Starting HTTP API server...");

    let socket_addr: SocketAddr = match addr {
        Some(addr) => addr.parse().map_err(|e| {
            ContextifyerError::ValidationError(format!("Invalid address '{}': {}", addr, e))
        })?,
        None => settings.server_addr()?,
    };

    let (contextifier, source) = helpers::build_contextifier(&settings).await?;
    let labels = contextifier.label_count();

    println!();
    println!("Contextifyer API Server");
    println!();
    println!("   Address: http://{}", socket_addr);
    println!("   Labels:  {} from {}", labels, source.describe());
    println!();
    println!("   Endpoints:");
    println!("   - POST /contextify - Link ontology terms in markdown");
    println!("   - GET  /labels - List the loaded labels");
    println!("   - POST /labels/reload - Refetch labels");
    println!("   - GET  /health - Health check");
    println!();

    let server = ApiServer::new(
        ApiServerConfig { addr: socket_addr },
        Arc::new(contextifier),
        Some(source),
    );
    server.serve().await?;

    Ok(())
}
