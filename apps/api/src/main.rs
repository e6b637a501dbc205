mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod portfolio;
mod routes;
mod scraping;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::email_writer::EmailWriter;
use crate::llm_client::LlmClient;
use crate::portfolio::store::PortfolioStore;
use crate::routes::build_router;
use crate::scraping::fetcher::HttpPageFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing or placeholder API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cold Mail Generator v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(&config)?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize page fetcher
    let fetcher = HttpPageFetcher::new(config.fetch_timeout)?;

    // Load the portfolio once; it is read-only from here on
    let mut portfolio = PortfolioStore::from_csv(&config.portfolio_path, config.skill_matcher.build());
    portfolio.load()?;

    let writer = match &config.persona_file {
        Some(path) => {
            info!("Using persona from {}", path.display());
            EmailWriter::from_file(path)?
        }
        None => EmailWriter::default(),
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        fetcher: Arc::new(fetcher),
        portfolio: Arc::new(portfolio),
        writer: Arc::new(writer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
