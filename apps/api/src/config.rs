use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::errors::AppError;
use crate::portfolio::matching::MatcherKind;

/// Value shipped in the sample `.env`; treated the same as a missing key.
const PLACEHOLDER_API_KEY: &str = "your_valid_api_key_here";

pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_JOB_URL: &str = "https://jobs.nike.com/?jobSearch=true&jsOffset=0&jsSort=posting_start_date&jsLanguage=en";

/// Application configuration loaded from environment variables.
/// Fails at startup if the LLM credential is missing or still the placeholder.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub llm_max_attempts: u32,
    pub fetch_timeout: Duration,
    pub portfolio_path: PathBuf,
    pub skill_matcher: MatcherKind,
    pub persona_file: Option<PathBuf>,
    pub default_job_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_api_key = validate_api_key(std::env::var("GROQ_API_KEY").ok().as_deref())?;

        Ok(Config {
            llm_api_key,
            llm_api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            llm_max_attempts: parse_env::<u32>("LLM_MAX_ATTEMPTS", 1)?.max(1),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 30)?),
            portfolio_path: PathBuf::from(env_or("PORTFOLIO_PATH", "resource/portfolio.csv")),
            skill_matcher: env_or("SKILL_MATCHER", "keyword")
                .parse()
                .context("SKILL_MATCHER must be one of: exact, keyword, fuzzy")?,
            persona_file: std::env::var("PERSONA_FILE").ok().map(PathBuf::from),
            default_job_url: env_or("DEFAULT_JOB_URL", DEFAULT_JOB_URL),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Rejects a missing, blank or placeholder API key before any network call is made.
pub fn validate_api_key(key: Option<&str>) -> Result<String, AppError> {
    match key.map(str::trim) {
        Some(k) if !k.is_empty() && k != PLACEHOLDER_API_KEY => Ok(k.to_string()),
        _ => Err(AppError::Config(
            "Invalid or missing GROQ_API_KEY. Set a valid API key in the environment or .env file."
                .to_string(),
        )),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let err = validate_api_key(None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_blank_key_is_config_error() {
        assert!(matches!(
            validate_api_key(Some("   ")),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_placeholder_key_is_config_error() {
        assert!(matches!(
            validate_api_key(Some("your_valid_api_key_here")),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_valid_key_is_trimmed() {
        assert_eq!(validate_api_key(Some(" gsk_abc \n")).unwrap(), "gsk_abc");
    }
}
