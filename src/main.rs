use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use tern::api::{self, AppState};
use tern::config::Config;
use tern::storage::{Compactor, FileStore, UrlStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize storage
    let store: Arc<dyn UrlStore> = Arc::new(FileStore::new(&config.store.path));
    info!("Using file-backed store: {}", config.store.path);

    // Start the expiry sweeper
    let _compactor = Compactor::start(
        Arc::clone(&store),
        Duration::from_secs(config.expiry.sweep_interval_secs),
    );
    info!(
        "Expiry sweep every {}s, default ttl {}s",
        config.expiry.sweep_interval_secs, config.store.default_ttl_secs
    );

    // Create router
    let state = Arc::new(AppState::new(store, config.store.default_ttl_secs));
    let router = api::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
