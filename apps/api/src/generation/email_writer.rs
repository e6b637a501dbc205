//! Email Writer: drafts one cold email per job posting.
//!
//! The model's text is returned verbatim: no trimming, no re-parsing.

use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{
    fill_template, DEFAULT_PERSONA, EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM, NO_LINKS_NOTE,
};
use crate::llm_client::prompts::NO_PREAMBLE_INSTRUCTION;
use crate::llm_client::LlmBackend;
use crate::models::job::JobPosting;

/// Holds the sender persona that every email is written as.
#[derive(Debug, Clone)]
pub struct EmailWriter {
    persona: String,
}

impl Default for EmailWriter {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}

impl EmailWriter {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    /// Reads the persona from a text file; a blank file is a configuration error.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let persona = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read persona file {}: {e}", path.display()))
        })?;
        if persona.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Persona file {} is empty",
                path.display()
            )));
        }
        Ok(Self::new(persona.trim()))
    }

    /// Drafts an email for `job` that may cite `links`.
    pub async fn write_mail(
        &self,
        job: &JobPosting,
        links: &[String],
        llm: &dyn LlmBackend,
    ) -> Result<String, AppError> {
        let prompt = self.build_prompt(job, links)?;
        let email = llm.complete(&prompt, EMAIL_SYSTEM).await?;
        info!(
            "Drafted email for role '{}' ({} link(s) offered)",
            job.role,
            links.len()
        );
        Ok(email)
    }

    /// Fills the email template. Every link is always listed in the prompt.
    pub fn build_prompt(&self, job: &JobPosting, links: &[String]) -> Result<String, AppError> {
        let job_description = serde_json::to_string_pretty(job)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize job: {e}")))?;

        let link_list = if links.is_empty() {
            NO_LINKS_NOTE.to_string()
        } else {
            links
                .iter()
                .map(|l| format!("- {l}"))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(fill_template(
            EMAIL_PROMPT_TEMPLATE,
            &[
                ("job_description", job_description.as_str()),
                ("persona", self.persona.as_str()),
                ("link_list", link_list.as_str()),
                ("no_preamble", NO_PREAMBLE_INSTRUCTION),
            ],
        ))
    }
}
