mod config;
mod cv;
mod document;
mod errors;
mod llm_client;
mod routes;
mod scholarship;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gradpath API v{}", env!("CARGO_PKG_VERSION"));

    let llm = GeminiClient::from_config(&config).context("Failed to build HTTP client")?;
    info!(
        "LLM client initialized (model: {}, extraction: {:?})",
        llm.model(),
        config.extraction_strategy
    );
    // The key is read per request; this only warns early about a likely misconfiguration.
    if std::env::var(&config.api_key_var).is_err() {
        warn!(
            "{} is not set; generation requests will fail until it is",
            config.api_key_var
        );
    }

    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
