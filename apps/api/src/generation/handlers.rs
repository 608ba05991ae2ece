//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisError;
use crate::errors::AppError;
use crate::generation::cover_letter::generate_cover_letter;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    pub highlighted_skills: Vec<String>,
    pub warnings: Vec<String>,
}

/// POST /api/v1/cover-letter
///
/// Drafts a cover letter highlighting the resume's entity and noun terms.
/// Requires ANTHROPIC_API_KEY; there is no deterministic fallback for prose.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AnalysisError::EmptyResume.into());
    }
    if request.job_description.trim().is_empty() {
        return Err(AnalysisError::EmptyJobDescription.into());
    }

    let llm = state.llm.clone().ok_or_else(|| {
        AppError::Unavailable("Cover letter generation requires ANTHROPIC_API_KEY".to_string())
    })?;

    let analyzer = state.analyzer.clone();
    let resume_text = request.resume_text;
    let job_description = request.job_description.clone();
    let analysis =
        tokio::task::spawn_blocking(move || analyzer.analyze(&resume_text, &job_description))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}"))
            })??;

    let cover_letter =
        generate_cover_letter(&llm, &request.job_description, &analysis.resume_skills).await?;

    Ok(Json(CoverLetterResponse {
        cover_letter,
        highlighted_skills: analysis.resume_skills.iter().map(String::from).collect(),
        warnings: analysis.warnings,
    }))
}
