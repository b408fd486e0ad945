//! Server binary: load settings, restore sessions, serve HTTP + WS.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bingo_server::http;
use bingo_server::registry::SessionRegistry;
use bingo_server::state::AppState;
use bingo_server::websocket::broadcast::BroadcastHub;
use bingo_store::JsonFileStore;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bingo-server", about = "Multiplayer word-bingo session server", version)]
struct Args {
    /// Settings file path (default: $BINGO_CONFIG or ./bingo.json).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => {
            bingo_settings::reload_settings_from_path(path);
            bingo_settings::get_settings()
        }
        None => bingo_settings::get_settings(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .init();

    let store = Arc::new(
        JsonFileStore::new(&settings.storage.path)
            .with_context(|| format!("creating snapshot dir {}", settings.storage.path))?,
    );
    let registry = Arc::new(SessionRegistry::new());
    let restored = registry.hydrate(store.as_ref()).await;
    info!(restored, "session registry ready");

    let hub = Arc::new(BroadcastHub::new());
    let state = AppState::new(registry, hub, store, Arc::clone(&settings));
    let app = http::router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
