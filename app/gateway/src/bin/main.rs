//! Studybuddy gateway binary entry point.
//!
//! Loads TOML configuration, seeds settings from the environment and the
//! settings file, and runs the axum server with graceful shutdown on ctrl-c.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use studybuddy_gateway::GatewayConfig;
use tracing_subscriber::EnvFilter;

/// Studybuddy gateway.
#[derive(Debug, Parser)]
#[command(name = "studybuddy-gateway", version, about)]
struct Args {
    /// Path to the gateway TOML config. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding `[server] bind`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => {
            let config = GatewayConfig::load(path)?;
            tracing::info!("loaded configuration from {}", path.display());
            config
        }
        None => GatewayConfig::default(),
    };
    let bind = args
        .bind
        .as_deref()
        .unwrap_or(config.bind_address())
        .to_owned();

    let handle = studybuddy_gateway::serve_with_config(&config, &bind)
        .await
        .with_context(|| format!("failed to start gateway on {bind}"))?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to install ctrl-c handler")?;
    handle.shutdown().await?;
    tracing::info!("gateway shut down");
    Ok(())
}
