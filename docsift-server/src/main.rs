//! docsift Server - Headless Daemon
//!
//! An axum HTTP server that:
//! - Splits large local files into chunks and indexes them batch by batch
//! - Re-queries the partially built index after every batch
//! - Reports per-search progress while a search is running
//! - Summarizes the collected answers into one response
//!
//! Access via: http://localhost:8045

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config_commands;
mod middleware;
mod router;
mod server_utils;
mod state;

#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands, ConfigCommands};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Config(ConfigCommands::Show { json })) => {
            config_commands::show_config(cli.config.as_deref(), json)
        },
        Some(Commands::Serve { port }) => serve(cli.config.as_deref(), port).await,
        None => serve(cli.config.as_deref(), None).await,
    }
}

async fn serve(config_path: Option<&std::path::Path>, port: Option<u16>) -> Result<()> {
    let mut config = docsift_core::config::load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    if let Err(e) = docsift_core::metrics::init_metrics() {
        warn!("[Server] Prometheus recorder unavailable: {}", e);
    }

    info!("[Server] docsift starting on port {}...", config.server.port);
    info!(
        "[Server] Upstream: {} (model {}, auth {})",
        config.upstream.endpoint, config.upstream.model, config.upstream.auth_mode
    );

    let state = AppState::new(config)?;
    let sweeper = state.start_background_tasks();

    let listener = server_utils::create_listener(&state.config().server).await?;
    let addr = listener.local_addr()?;
    let app = router::build_router(state);

    info!("[Server] Listening on http://{}", addr);
    info!("[Server] API available at http://{}/api/", addr);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    sweeper.abort();
    info!("[Server] Stopped");
    Ok(())
}
