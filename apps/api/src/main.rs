mod config;
mod contract;
mod errors;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contract API v{}", env!("CARGO_PKG_VERSION"));

    // Requests without their own key fall back to this client
    let llm: Option<Arc<dyn TextGenerator>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(config.llm_settings(key))?;
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("OPENAI_API_KEY not set; every request must supply api_key");
            None
        }
    };

    info!("Lender: {}", config.lender_name);

    let state = AppState {
        llm,
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
