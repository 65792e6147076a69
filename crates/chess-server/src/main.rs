//! Chess Server
//!
//! Serves the game API and the frontend's static files.

use anyhow::Context;
use chess_server::config::ServerConfig;
use chess_server::{router, AppState};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Chess Server - play chess against a random-move opponent.
#[derive(Parser)]
#[command(name = "chess-server")]
#[command(about = "Serves the chess game API and frontend")]
struct Args {
    /// Path to the configuration file (default: chess-server.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config = ServerConfig::load(args.config.as_deref()).context("Failed to load config")?;
    tracing::info!("Static files: {:?}", config.static_dir);
    if config.persist_games {
        tracing::info!("Saving finished games to {:?}", config.data_dir);
    } else {
        tracing::info!("Game persistence disabled");
    }
    tracing::info!("Computer plays: {:?}", config.ai_color);

    let state = AppState::from_config(&config);
    let app = router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;
    tracing::info!("Server running on http://{}", config.bind);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
