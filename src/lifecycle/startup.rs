//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//!   (metrics → upstream gateway → access layer → listener)
//! - Serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::access::AccessLayer;
use crate::config::HubConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::observability::init_metrics;
use crate::upstream::{UpstreamError, UpstreamGateway};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialize upstream gateway: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the access layer described by `config`.
pub fn build_access_layer(config: &HubConfig) -> Result<Arc<AccessLayer>, UpstreamError> {
    let gateway = UpstreamGateway::new(&config.upstream, &config.retries)?;
    Ok(Arc::new(AccessLayer::new(gateway, &config.cache)))
}

/// Start every subsystem and serve until `shutdown` fires.
pub async fn run(config: HubConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let access = build_access_layer(&config)?;
    tracing::debug!(access = ?access, "Access layer ready");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config, access);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
