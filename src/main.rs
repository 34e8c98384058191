//! splortshub: read-through caching hub for the Blaseball game-data API.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────────────┐
//!                       │                     SPLORTSHUB                      │
//!                       │                                                     │
//!    Client Request     │  ┌─────────┐   ┌──────────┐   ┌────────────────┐   │
//!    ───────────────────┼─▶│  http   │──▶│   api    │──▶│  access layer  │   │
//!                       │  │ server  │   │ handlers │   │  (TTL caches,  │   │
//!                       │  └─────────┘   └──────────┘   │   fan-out)     │   │
//!                       │                               └───────┬────────┘   │
//!                       │                                       │ miss       │
//!                       │                                       ▼            │
//!    Client Response    │  ┌─────────┐   ┌──────────┐   ┌────────────────┐   │
//!    ◀──────────────────┼──│ schema  │◀──│ response │◀──│ upstream       │◀──┼── Upstream
//!                       │  │ rename  │   │ mapping  │   │ gateway+retry  │   │    API
//!                       │  └─────────┘   └──────────┘   └────────────────┘   │
//!                       └────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use splortshub::config::load_config;
use splortshub::lifecycle::{signals, startup, Shutdown};
use splortshub::observability::init_logging;

#[derive(Parser)]
#[command(name = "splortshub")]
#[command(about = "Caching proxy for the Blaseball game-data API", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults plus environment are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!("splortshub v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream,
        teams_ttl_secs = config.cache.teams_ttl_secs,
        players_ttl_secs = config.cache.players_ttl_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    startup::run(config, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
