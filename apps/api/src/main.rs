mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod roles;
mod routes;
mod similarity;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pipeline::Analyzer;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::similarity::{FastEmbedder, SimilarityScorer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Reviewer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_api_url.clone())?;
    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY not set; analyses will be rejected until it is configured");
    }
    info!(
        "LLM client initialized (model: {}, template: {})",
        llm_client::MODEL,
        config.report_template
    );

    // Embedding model loads lazily on the first analysis
    let scorer = SimilarityScorer::new(Arc::new(FastEmbedder::new()));

    let state = AppState {
        analyzer: Analyzer::new(scorer, Arc::new(llm), config.report_template),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
