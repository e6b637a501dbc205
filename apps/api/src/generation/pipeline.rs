//! Cold Mail Pipeline: orchestrates one submission from URL to drafted emails.
//!
//! Flow: fetch page → clean text → extract jobs → for each job:
//!       query portfolio links → write email.
//!
//! Stages before the per-job loop abort the run. Inside the loop each job is
//! isolated: a failed email is recorded on that job and the loop moves on.

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::email_writer::EmailWriter;
use crate::generation::job_extractor::extract_jobs;
use crate::llm_client::LlmBackend;
use crate::models::job::JobPosting;
use crate::portfolio::store::PortfolioStore;
use crate::scraping::cleaner::clean_text;
use crate::scraping::fetcher::PageFetcher;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The stage a run was in when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fetching,
    Cleaning,
    Extracting,
    QueryingLinks,
    WritingEmail,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Fetching => "Fetching the page",
            Stage::Cleaning => "Cleaning the page text",
            Stage::Extracting => "Extracting jobs",
            Stage::QueryingLinks => "Querying portfolio links",
            Stage::WritingEmail => "Writing the email",
        };
        f.write_str(label)
    }
}

/// A stage-level failure: which stage, and why.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    pub source: AppError,
}

impl PipelineError {
    fn at(stage: Stage) -> impl FnOnce(AppError) -> Self {
        move |source| Self { stage, source }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let (status, code) = self.source.status_and_code();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            warn!("{self}");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "stage": self.stage,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

/// Result of processing one extracted job. Exactly one of `email` / `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub job: JobPosting,
    pub links: Vec<String>,
    pub email: Option<String>,
    pub error: Option<String>,
}

/// Everything a successful run produced, in extraction order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub url: String,
    pub jobs: Vec<JobOutcome>,
}

impl RunReport {
    pub fn emails_written(&self) -> usize {
        self.jobs.iter().filter(|j| j.email.is_some()).count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Borrowed view of the collaborators one run needs.
pub struct Pipeline<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub llm: &'a dyn LlmBackend,
    pub portfolio: &'a PortfolioStore,
    pub writer: &'a EmailWriter,
}

impl Pipeline<'_> {
    /// Runs the full pipeline for `url`, one job at a time.
    ///
    /// Steps:
    /// 1. fetch_text() → raw page text
    /// 2. clean_text() → prompt-ready text (empty → EmptyResult)
    /// 3. extract_jobs() → Vec<JobPosting>
    /// 4. per job: query_links() → write_mail(), failures recorded per job
    pub async fn run(&self, url: &str) -> Result<RunReport, PipelineError> {
        info!("Run started for {url}");

        let raw = self
            .fetcher
            .fetch_text(url)
            .await
            .map_err(PipelineError::at(Stage::Fetching))?;

        let cleaned = clean_text(&raw);
        if cleaned.is_empty() {
            return Err(PipelineError::at(Stage::Cleaning)(AppError::EmptyResult));
        }
        info!(
            "Cleaned page text: {} -> {} characters",
            raw.len(),
            cleaned.len()
        );

        let jobs = extract_jobs(&cleaned, self.llm)
            .await
            .map_err(PipelineError::at(Stage::Extracting))?;

        let mut outcomes = Vec::with_capacity(jobs.len());
        for (i, job) in jobs.into_iter().enumerate() {
            outcomes.push(self.process_job(i, job).await);
        }

        let report = RunReport {
            url: url.to_string(),
            jobs: outcomes,
        };
        info!(
            "Run finished for {url}: {} job(s), {} email(s)",
            report.jobs.len(),
            report.emails_written()
        );
        Ok(report)
    }

    async fn process_job(&self, index: usize, job: JobPosting) -> JobOutcome {
        let links = self.portfolio.query_links(&job.skills);
        info!(
            "Job {} '{}': {} matched {} skill(s) to {} link(s)",
            index + 1,
            job.role,
            Stage::QueryingLinks,
            job.skills.len(),
            links.len()
        );

        match self.writer.write_mail(&job, &links, self.llm).await {
            Ok(email) => JobOutcome {
                job,
                links,
                email: Some(email),
                error: None,
            },
            Err(e) => {
                let err = PipelineError::at(Stage::WritingEmail)(e);
                warn!("Job {} '{}': {err}", index + 1, job.role);
                JobOutcome {
                    job,
                    links,
                    email: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
