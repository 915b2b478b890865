//! s3-browser binary

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use s3_browser::{AppState, Cli};
use s3b_s3::S3Connector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let manager = cli.config_manager()?;
    let mut config = manager
        .load()
        .with_context(|| format!("failed to load {}", manager.config_path().display()))?;
    cli.apply(&mut config);

    if cli.write_config {
        manager.save(&config)?;
        tracing::info!(path = %manager.config_path().display(), "Configuration written");
        return Ok(());
    }

    if let Some(dir) = &config.server.static_dir
        && !dir.is_dir()
    {
        tracing::warn!(dir = %dir.display(), "Static directory does not exist");
    }

    let state = AppState::new(config, Arc::new(S3Connector));
    s3_browser::serve(state).await
}
