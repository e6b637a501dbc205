use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Could not parse LLM response: {diagnostic}")]
    ResponseParse { raw: String, diagnostic: String },

    #[error("LLM backend error: {0}")]
    Backend(String),

    #[error("The fetched page contained no usable text")]
    EmptyResult,

    #[error("Portfolio error: {0}")]
    Portfolio(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Backend(e.to_string())
    }
}

impl AppError {
    /// Status and machine-readable code for the JSON error envelope.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AppError::Fetch(_) => (StatusCode::BAD_GATEWAY, "FETCH_ERROR"),
            AppError::ResponseParse { .. } => (StatusCode::BAD_GATEWAY, "RESPONSE_PARSE_ERROR"),
            AppError::Backend(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            AppError::EmptyResult => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_RESULT"),
            AppError::Portfolio(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PORTFOLIO_ERROR"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            AppError::ResponseParse { raw, diagnostic } => {
                tracing::error!("LLM response parse error: {diagnostic}; raw={raw:?}");
            }
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            e if status.is_server_error() => tracing::error!("{e}"),
            _ => {}
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
