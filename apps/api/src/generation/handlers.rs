//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::JobTarget;
use crate::errors::AppError;
use crate::generation::generator::{generate_cover_letter, generate_resume, load_manifest};
use crate::render::compiler::CompileReport;
use crate::sanitize::sanitize_filename;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub run_id: Uuid,
    pub selected_blocks: Vec<String>,
    pub rendered_tex: String,
    pub compile: CompileReport,
    pub pdf_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub run_id: Uuid,
    pub rendered_tex: String,
    pub compile: CompileReport,
    pub pdf_url: Option<String>,
}

fn validate_job(job: &JobTarget) -> Result<(), AppError> {
    if job.job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }
    if job.company.trim().is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }
    if job.description.trim().is_empty() {
        return Err(AppError::Validation("description cannot be empty".to_string()));
    }
    Ok(())
}

fn pdf_url(run_id: Uuid, has_pdf: bool) -> Option<String> {
    has_pdf.then(|| format!("/api/v1/runs/{run_id}/pdf"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume
///
/// Runs the full resume pipeline for the posted job target. The rendered
/// LaTeX and the compile report come back regardless of compile outcome —
/// only the PDF link depends on a successful compile.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(job): Json<JobTarget>,
) -> Result<Json<ResumeResponse>, AppError> {
    validate_job(&job)?;

    let artifacts = generate_resume(&state.config, state.llm.as_ref(), &job).await?;

    Ok(Json(ResumeResponse {
        run_id: artifacts.run_id,
        selected_blocks: artifacts.selected_blocks,
        pdf_url: pdf_url(artifacts.run_id, artifacts.pdf_path.is_some()),
        rendered_tex: artifacts.rendered_tex,
        compile: artifacts.compile,
    }))
}

/// POST /api/v1/cover-letter
///
/// Drafts, renders, and compiles a cover letter for the posted job target.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(job): Json<JobTarget>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    validate_job(&job)?;

    let artifacts = generate_cover_letter(&state.config, state.llm.as_ref(), &job).await?;

    Ok(Json(CoverLetterResponse {
        run_id: artifacts.run_id,
        pdf_url: pdf_url(artifacts.run_id, artifacts.pdf_path.is_some()),
        rendered_tex: artifacts.rendered_tex,
        compile: artifacts.compile,
    }))
}

/// GET /api/v1/runs/:run_id/pdf
///
/// Streams the compiled PDF of a previous run. The download filename is
/// derived from the sanitized company name in the run manifest.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let manifest = load_manifest(&state.config, run_id).await?;

    let pdf_path = state
        .config
        .output_dir
        .join(run_id.to_string())
        .join(format!("{}.pdf", manifest.artifact));

    let bytes = tokio::fs::read(&pdf_path)
        .await
        .map_err(|_| AppError::NotFound(format!("No PDF available for run {run_id}")))?;

    let filename = format!(
        "{}_{}.pdf",
        sanitize_filename(&manifest.company),
        manifest.artifact
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, description: &str) -> JobTarget {
        JobTarget {
            job_title: title.to_string(),
            company: company.to_string(),
            location: None,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(validate_job(&job("", "Acme", "desc")).is_err());
        assert!(validate_job(&job("Engineer", "  ", "desc")).is_err());
        assert!(validate_job(&job("Engineer", "Acme", "")).is_err());
        assert!(validate_job(&job("Engineer", "Acme", "desc")).is_ok());
    }

    #[test]
    fn test_pdf_url_only_when_pdf_exists() {
        let id = Uuid::new_v4();
        assert_eq!(pdf_url(id, false), None);
        assert_eq!(pdf_url(id, true), Some(format!("/api/v1/runs/{id}/pdf")));
    }
}
