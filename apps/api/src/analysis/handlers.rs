use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::export::{export_filename, parse_export, render_export, ExportSummary};
use crate::analysis::pipeline::{AnalysisRequest, AnalysisResult};
use crate::errors::AppError;
use crate::extraction::{extract_pdf_text, DocumentText};
use crate::roles::{default_job_description, find_role, RoleProfile, ROLES};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeBody {
    pub resume_text: String,
    pub role: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Serialize)]
pub struct RoleSummary {
    #[serde(flatten)]
    pub profile: &'static RoleProfile,
    pub default_job_description: String,
}

fn known_role(role: &str) -> Result<String, AppError> {
    let role = role.trim();
    find_role(role)
        .map(|r| r.name.to_string())
        .ok_or_else(|| AppError::validation(format!("Unknown role '{role}'")))
}

/// GET /api/v1/roles
pub async fn handle_list_roles() -> Json<Vec<RoleSummary>> {
    Json(
        ROLES
            .iter()
            .map(|profile| RoleSummary {
                profile,
                default_job_description: default_job_description(profile),
            })
            .collect(),
    )
}

/// POST /api/v1/analyses
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, AppError> {
    let request = AnalysisRequest {
        resume: DocumentText::from_pasted(body.resume_text)?,
        role: known_role(&body.role)?,
        job_description: body.job_description,
    };
    let result = state.analyzer.analyze(request).await?;
    Ok(Json(result))
}

/// POST /api/v1/analyses/pdf
///
/// Multipart fields: `resume` (PDF file), `role`, optional `job_description`.
pub async fn handle_analyze_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut pdf: Option<Bytes> = None;
    let mut role = None;
    let mut job_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Could not read resume upload: {e}")))?;
                pdf = Some(bytes);
            }
            "role" | "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Could not read field '{name}': {e}")))?;
                if name == "role" {
                    role = Some(text);
                } else {
                    job_description = Some(text);
                }
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::validation("Missing 'resume' file field"))?;
    let role = known_role(&role.ok_or_else(|| AppError::validation("Missing 'role' field"))?)?;

    info!("Extracting text from uploaded PDF ({} bytes)", pdf.len());
    let resume = tokio::task::spawn_blocking(move || extract_pdf_text(&pdf))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    info!("Extracted {} words from resume PDF", resume.word_count());

    let result = state
        .analyzer
        .analyze(AnalysisRequest {
            resume,
            role,
            job_description,
        })
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/analyses/export
pub async fn handle_export(Json(result): Json<AnalysisResult>) -> impl IntoResponse {
    let filename = export_filename(&result.role, result.analyzed_at);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        render_export(&result),
    )
}

/// POST /api/v1/analyses/export/summary
///
/// Body: a previously exported report as plain text.
pub async fn handle_read_export(body: String) -> Result<Json<ExportSummary>, AppError> {
    let summary = parse_export(&body).map_err(|e| AppError::validation(e.to_string()))?;
    Ok(Json(summary))
}
