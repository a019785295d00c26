//! FormForge API - Main Entry Point

use std::sync::Arc;

use formforge_api::middleware::session::JwtSessionProvider;
use formforge_api::{build_router, ApiState, MemoryStore, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("FormForge API v{}", env!("CARGO_PKG_VERSION"));

    // Load config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "/etc/formforge/api.json".into());

    let config = ServerConfig::load(&config_path).unwrap_or_else(|_| {
        tracing::warn!("Config not found, using defaults");
        ServerConfig::default()
    });

    let state = ApiState {
        store: Arc::new(MemoryStore::new(&config.form_id)),
        sessions: Arc::new(JwtSessionProvider::new(&config.auth.jwt_secret)),
        config: config.clone(),
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("FormForge API listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
