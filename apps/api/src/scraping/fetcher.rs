//! Page Fetcher: downloads a job-listing page and returns its visible text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{Html, Node, Selector};
use tracing::{debug, info};

use crate::errors::AppError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Elements whose text never reaches the reader.
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Returns the primary textual content of the document at `url`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, AppError>;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, AppError> {
        let url = parse_page_url(url)?;
        info!("Fetching job page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("{url} returned HTTP {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to read body of {url}: {e}")))?;

        let text = extract_page_text(&html);
        if text.trim().is_empty() {
            return Err(AppError::Fetch(format!("{url} returned an empty page")));
        }

        debug!("Fetched {} characters of text from {}", text.len(), url);
        Ok(text)
    }
}

/// Accepts only absolute http(s) URLs.
pub fn parse_page_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::Validation(format!("'{raw}' is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::Validation(format!(
            "Unsupported URL scheme '{other}'; use http or https"
        ))),
    }
}

/// Concatenates the text nodes of `<body>` (or the whole document when there is
/// no body), skipping script-like elements. Text nodes are separated by newlines.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .map(|body| *body)
        .unwrap_or_else(|| document.tree.root());

    let mut parts = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join("\n")
}
