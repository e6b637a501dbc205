//! Job Extractor: turns cleaned careers-page text into structured `JobPosting`s.

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::JOB_EXTRACT_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, LlmBackend};
use crate::models::job::JobPosting;

/// Asks the LLM for the job postings in `cleaned_text`.
/// Backend failures are not retried here.
pub async fn extract_jobs(
    cleaned_text: &str,
    llm: &dyn LlmBackend,
) -> Result<Vec<JobPosting>, AppError> {
    let prompt = JOB_EXTRACT_PROMPT_TEMPLATE.replace("{page_data}", cleaned_text);
    let raw = llm.complete(&prompt, JSON_ONLY_SYSTEM).await?;
    let jobs = parse_jobs_response(&raw)?;
    info!("Extracted {} job posting(s)", jobs.len());
    Ok(jobs)
}

/// Strictly parses an LLM response body into job postings.
///
/// A bare object is accepted as a single job. Anything that is not valid JSON,
/// or not an object / array of objects in the `JobPosting` shape, is rejected
/// whole with the raw text and the parser's diagnostic.
pub fn parse_jobs_response(raw: &str) -> Result<Vec<JobPosting>, AppError> {
    let body = strip_json_fences(raw);
    let parse_error = |diagnostic: String| AppError::ResponseParse {
        raw: raw.to_string(),
        diagnostic,
    };

    let value: Value = serde_json::from_str(body).map_err(|e| parse_error(e.to_string()))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<JobPosting>(item)
                    .map_err(|e| parse_error(format!("job at index {i}: {e}")))
            })
            .collect(),
        obj @ Value::Object(_) => serde_json::from_value::<JobPosting>(obj)
            .map(|job| vec![job])
            .map_err(|e| parse_error(e.to_string())),
        other => Err(parse_error(format!(
            "expected a JSON array or object of jobs, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
