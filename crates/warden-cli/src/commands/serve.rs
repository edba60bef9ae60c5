//! `warden serve` -- run the HTTP API.
//!
//! # Examples
//!
//! ```text
//! warden serve
//! warden serve --port 9000 --config ./warden.json
//! ```

use std::sync::Arc;

use clap::Args;
use tracing::info;

use warden_core::bootstrap::build_orchestrator;
use warden_services::api::{ApiState, build_router};
use warden_services::server::serve;

/// Arguments for the `warden serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides `server.port`).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Config file path (overrides auto-discovery).
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Run the HTTP server until shutdown.
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let orchestrator = Arc::new(build_orchestrator(&config)?);
    let router = build_router(ApiState::new(orchestrator), &config.server.cors_origins);

    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.backend.model,
        "starting warden serve"
    );
    serve(router, &config.server.host, config.server.port).await?;
    Ok(())
}
