pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::portfolio::handlers as portfolio_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Web UI
        .route("/", get(handlers::handle_index))
        .route("/generate", post(handlers::handle_generate_form))
        // Cold mail API
        .route("/api/v1/emails", post(handlers::handle_generate))
        // Portfolio API
        .route(
            "/api/v1/portfolio",
            get(portfolio_handlers::handle_list_portfolio),
        )
        .route(
            "/api/v1/portfolio/query",
            post(portfolio_handlers::handle_query_links),
        )
        .with_state(state)
}
