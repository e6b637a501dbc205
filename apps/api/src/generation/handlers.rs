use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::generation::pipeline::{PipelineError, RunReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
}

/// One rendered job card on the index page.
pub struct JobView {
    pub role: String,
    pub experience: String,
    pub skills: String,
    pub links: Vec<String>,
    pub email: String,
    pub error: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub url: String,
    pub error: String,
    pub submitted: bool,
    pub jobs: Vec<JobView>,
}

impl IndexTemplate {
    fn empty(url: String) -> Self {
        Self {
            url,
            error: String::new(),
            submitted: false,
            jobs: Vec::new(),
        }
    }

    fn from_report(report: RunReport) -> Self {
        let jobs = report
            .jobs
            .into_iter()
            .map(|outcome| JobView {
                role: outcome.job.role,
                experience: outcome.job.experience,
                skills: outcome.job.skills.join(", "),
                links: outcome.links,
                email: outcome.email.unwrap_or_default(),
                error: outcome.error.unwrap_or_default(),
            })
            .collect();
        Self {
            url: report.url,
            error: String::new(),
            submitted: true,
            jobs,
        }
    }
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Response {
    render_html(IndexTemplate::empty(state.config.default_job_url.clone()))
}

/// POST /generate
/// A failed run renders the form again with one error banner.
pub async fn handle_generate_form(
    State(state): State<AppState>,
    Form(req): Form<GenerateRequest>,
) -> Response {
    match state.pipeline().run(&req.url).await {
        Ok(report) => render_html(IndexTemplate::from_report(report)),
        Err(e) => {
            warn!("Run for {} failed: {e}", req.url);
            let mut page = IndexTemplate::empty(req.url);
            page.error = format!("An error occurred: {e}");
            page.submitted = true;
            render_html(page)
        }
    }
}

/// POST /api/v1/emails
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<RunReport>, PipelineError> {
    let report = state.pipeline().run(&req.url).await?;
    Ok(Json(report))
}

fn render_html<T: Template>(tpl: T) -> Response {
    match tpl.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!("Template render failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("Server error: {err}")),
            )
                .into_response()
        }
    }
}
