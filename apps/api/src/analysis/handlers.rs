//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::suggestions::Tier;
use crate::analysis::{Analysis, AnalysisError};
use crate::documents::decode_upload;
use crate::errors::AppError;
use crate::generation::suggester::{
    generate_with_fallback, GeneratedSuggestions, SuggestionRequest, SuggestionSource,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub score: f64,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub color: &'static str,
    pub matched_terms: Vec<String>,
    pub missing_terms: Vec<String>,
    pub resume_terms: Vec<String>,
    pub job_terms: Vec<String>,
    /// Tier headline plus the generic lines, always present and in order.
    pub suggestions: Vec<String>,
    /// Extra lines from the LLM backend, when it is enabled and succeeded.
    pub generated_suggestions: Option<Vec<String>>,
    pub suggestion_source: SuggestionSource,
    pub warnings: Vec<String>,
}

/// A resume upload as received from a multipart form.
struct Upload {
    bytes: Bytes,
    content_type: Option<String>,
    file_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (PDF or text file) and `job_description` (text).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut upload: Option<Upload> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("resume") => {
                let content_type = field.content_type().map(String::from);
                let file_name = field.file_name().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                upload = Some(Upload {
                    bytes,
                    content_type,
                    file_name,
                });
            }
            Some("job_description") => {
                job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
            }
            _ => {}
        }
    }

    let upload = upload
        .filter(|u| !u.bytes.is_empty())
        .ok_or_else(|| AppError::Validation("Please upload a resume PDF".to_string()))?;
    if job_description.trim().is_empty() {
        return Err(AnalysisError::EmptyJobDescription.into());
    }

    // PDF decoding is CPU-bound; keep it off the async executor.
    let resume_text = tokio::task::spawn_blocking(move || {
        decode_upload(
            &upload.bytes,
            upload.content_type.as_deref(),
            upload.file_name.as_deref(),
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in decode: {e}")))??;

    let response = run_analysis(&state, resume_text, job_description).await?;
    Ok(Json(response))
}

/// POST /api/v1/analyze/text
///
/// Same analysis for callers that already hold the resume text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let response = run_analysis(&state, request.resume_text, request.job_description).await?;
    Ok(Json(response))
}

/// Runs the pipeline in `spawn_blocking`, then the configured suggestion backend.
async fn run_analysis(
    state: &AppState,
    resume_text: String,
    job_description: String,
) -> Result<AnalyzeResponse, AppError> {
    let analyzer = state.analyzer.clone();
    let (analysis, resume_text, job_description) = tokio::task::spawn_blocking(move || {
        analyzer
            .analyze(&resume_text, &job_description)
            .map(|analysis| (analysis, resume_text, job_description))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))??;

    let request = SuggestionRequest {
        resume_text: &resume_text,
        job_description: &job_description,
        analysis: &analysis,
    };
    let (generated, suggestion_warning) =
        generate_with_fallback(state.suggester.as_ref(), &request).await;

    let response = build_response(analysis, generated, suggestion_warning);
    info!(
        "Analysis {} complete: score={:.2} tier={:?} source={:?}",
        response.analysis_id, response.score, response.tier, response.suggestion_source
    );
    Ok(response)
}

fn build_response(
    analysis: Analysis,
    generated: GeneratedSuggestions,
    suggestion_warning: Option<String>,
) -> AnalyzeResponse {
    let Analysis {
        result,
        suggestion,
        mut warnings,
        ..
    } = analysis;
    warnings.extend(suggestion_warning);

    let tier = suggestion.tier;
    let generated_suggestions = match generated.source {
        SuggestionSource::Llm => Some(generated.lines),
        SuggestionSource::Tiered => None,
    };
    AnalyzeResponse {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        score: result.score,
        tier,
        tier_label: tier.label(),
        color: tier.color(),
        matched_terms: result.matched_terms(),
        missing_terms: result.missing_terms(),
        resume_terms: result.resume_terms.iter().map(String::from).collect(),
        job_terms: result.job_terms.iter().map(String::from).collect(),
        suggestions: suggestion.lines,
        generated_suggestions,
        suggestion_source: generated.source,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::suggestions::GENERIC_SUGGESTIONS;
    use crate::analysis::{Analyzer, LexiconAnnotator};

    fn analysis() -> Analysis {
        Analyzer::new(Arc::new(LexiconAnnotator::default()))
            .analyze(
                "Software engineer with experience in Python and machine learning",
                "Seeking a Python developer with machine learning expertise",
            )
            .unwrap()
    }

    #[test]
    fn test_llm_lines_do_not_replace_fixed_suggestions() {
        let generated = GeneratedSuggestions {
            lines: vec!["Mention your Python projects".to_string()],
            source: SuggestionSource::Llm,
        };
        let response = build_response(analysis(), generated, None);

        assert_eq!(response.suggestions.len(), 6);
        assert_eq!(response.suggestions[0], "Moderate match: Consider major updates");
        assert!(response.suggestions[1..] == GENERIC_SUGGESTIONS[..]);
        assert_eq!(
            response.generated_suggestions,
            Some(vec!["Mention your Python projects".to_string()])
        );
        assert_eq!(response.suggestion_source, SuggestionSource::Llm);
    }

    #[test]
    fn test_tiered_source_has_no_generated_lines() {
        let analysis = analysis();
        let generated = GeneratedSuggestions {
            lines: analysis.suggestion.lines.clone(),
            source: SuggestionSource::Tiered,
        };
        let response = build_response(analysis, generated, Some("fallback".to_string()));

        assert_eq!(response.suggestions.len(), 6);
        assert!(response.generated_suggestions.is_none());
        assert_eq!(response.warnings, vec!["fallback"]);
    }
}
