//! In-memory stand-ins for the network-facing traits.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::{Config, DEFAULT_JOB_URL, DEFAULT_LLM_API_URL, DEFAULT_LLM_MODEL};
use crate::errors::AppError;
use crate::generation::email_writer::EmailWriter;
use crate::llm_client::{LlmBackend, LlmError};
use crate::portfolio::matching::MatcherKind;
use crate::portfolio::store::{PortfolioRow, PortfolioStore};
use crate::scraping::fetcher::PageFetcher;
use crate::state::AppState;

/// Replays queued completions in order and records every prompt it sees.
/// Once the queue is empty every call fails with `EmptyContent`.
pub struct CannedLlm {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl CannedLlm {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmBackend for CannedLlm {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Serves fixed page text per URL; unknown URLs fail like an HTTP 404.
#[derive(Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
}

impl StaticPages {
    pub fn with_page(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for StaticPages {
    async fn fetch_text(&self, url: &str) -> Result<String, AppError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Fetch(format!("{url} returned HTTP 404 Not Found")))
    }
}

pub fn test_config() -> Config {
    Config {
        llm_api_key: "test-key".to_string(),
        llm_api_url: DEFAULT_LLM_API_URL.to_string(),
        llm_model: DEFAULT_LLM_MODEL.to_string(),
        llm_timeout: Duration::from_secs(5),
        llm_max_attempts: 1,
        fetch_timeout: Duration::from_secs(5),
        portfolio_path: PathBuf::from("resource/portfolio.csv"),
        skill_matcher: MatcherKind::Keyword,
        persona_file: None,
        default_job_url: DEFAULT_JOB_URL.to_string(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// App state over canned collaborators and a two-row portfolio (React, Django).
pub fn test_state(llm: Arc<CannedLlm>, fetcher: StaticPages) -> AppState {
    let mut portfolio = PortfolioStore::from_rows(
        vec![
            PortfolioRow::parse("React, Node.js", "https://example.com/react"),
            PortfolioRow::parse("Python, Django", "https://example.com/django"),
        ],
        MatcherKind::Keyword.build(),
    );
    portfolio.load().unwrap();

    AppState {
        config: test_config(),
        llm,
        fetcher: Arc::new(fetcher),
        portfolio: Arc::new(portfolio),
        writer: Arc::new(EmailWriter::default()),
    }
}

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn serve_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
