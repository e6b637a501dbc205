use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::portfolio::store::{LinkMatch, PortfolioRow};
use crate::state::AppState;

#[derive(Serialize)]
pub struct PortfolioListResponse {
    pub matcher: &'static str,
    pub rows: Vec<PortfolioRow>,
}

#[derive(Debug, Deserialize)]
pub struct LinkQueryRequest {
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Serialize)]
pub struct LinkQueryResponse {
    pub links: Vec<String>,
    pub matches: Vec<LinkMatch>,
}

/// GET /api/v1/portfolio
pub async fn handle_list_portfolio(State(state): State<AppState>) -> Json<PortfolioListResponse> {
    Json(PortfolioListResponse {
        matcher: state.portfolio.matcher_name(),
        rows: state.portfolio.rows().into_iter().cloned().collect(),
    })
}

/// POST /api/v1/portfolio/query
pub async fn handle_query_links(
    State(state): State<AppState>,
    Json(req): Json<LinkQueryRequest>,
) -> Json<LinkQueryResponse> {
    let matches = state.portfolio.rank(&req.skills);
    Json(LinkQueryResponse {
        links: matches.iter().map(|m| m.link.clone()).collect(),
        matches,
    })
}
