use std::sync::Arc;

use crate::config::Config;
use crate::generation::email_writer::EmailWriter;
use crate::generation::pipeline::Pipeline;
use crate::llm_client::LlmBackend;
use crate::portfolio::store::PortfolioStore;
use crate::scraping::fetcher::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// LLM backend. Default: `LlmClient` against the configured chat-completions endpoint.
    pub llm: Arc<dyn LlmBackend>,
    pub fetcher: Arc<dyn PageFetcher>,
    /// Loaded once at startup; read-only afterwards.
    pub portfolio: Arc<PortfolioStore>,
    pub writer: Arc<EmailWriter>,
}

impl AppState {
    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline {
            fetcher: self.fetcher.as_ref(),
            llm: self.llm.as_ref(),
            portfolio: &self.portfolio,
            writer: &self.writer,
        }
    }
}
