//! Suggestion generation — pluggable, trait-based backends for the improvement text.
//!
//! Default: `TieredSuggestionGenerator` (deterministic, derived from the score).
//! Optional: `LlmSuggestionGenerator` (free text via the LLM client).
//!
//! `AppState` holds an `Arc<dyn SuggestionGenerator>`, chosen at startup via config.
//! Backend output is supplementary: responses always carry the tiered lines, and
//! generated lines travel beside them. `generate_with_fallback` guarantees a
//! result: any backend error falls back to the tiered text plus a warning.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::analysis::Analysis;
use crate::generation::prompts::{SUGGESTIONS_MAX_TOKENS, SUGGESTIONS_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, PLAIN_TEXT_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

/// Upper bound on generated lines kept.
const MAX_GENERATED_LINES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Tiered,
    Llm,
}

/// Suggestion lines plus the backend that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSuggestions {
    pub lines: Vec<String>,
    pub source: SuggestionSource,
}

/// Inputs available to a suggestion backend.
pub struct SuggestionRequest<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub analysis: &'a Analysis,
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<GeneratedSuggestions, SuggestionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// TieredSuggestionGenerator (default)
// ────────────────────────────────────────────────────────────────────────────

pub struct TieredSuggestionGenerator;

#[async_trait]
impl SuggestionGenerator for TieredSuggestionGenerator {
    async fn generate(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<GeneratedSuggestions, SuggestionError> {
        Ok(tiered(request.analysis))
    }
}

fn tiered(analysis: &Analysis) -> GeneratedSuggestions {
    GeneratedSuggestions {
        lines: analysis.suggestion.lines.clone(),
        source: SuggestionSource::Tiered,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSuggestionGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmSuggestionGenerator(pub LlmClient);

#[async_trait]
impl SuggestionGenerator for LlmSuggestionGenerator {
    async fn generate(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<GeneratedSuggestions, SuggestionError> {
        let prompt = build_suggestions_prompt(request);
        let text = self
            .0
            .call_text(&prompt, PLAIN_TEXT_SYSTEM, SUGGESTIONS_MAX_TOKENS)
            .await?;

        Ok(GeneratedSuggestions {
            lines: split_generated_lines(&text),
            source: SuggestionSource::Llm,
        })
    }
}

fn build_suggestions_prompt(request: &SuggestionRequest<'_>) -> String {
    let missing = request.analysis.result.missing_terms();
    let missing = if missing.is_empty() {
        "none".to_string()
    } else {
        missing.join(", ")
    };

    SUGGESTIONS_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{score}", &format!("{:.2}", request.analysis.result.score))
        .replace("{missing_terms}", &missing)
        .replace("{resume_text}", request.resume_text)
        .replace("{job_description}", request.job_description)
}

fn split_generated_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(MAX_GENERATED_LINES)
        .map(String::from)
        .collect()
}

/// Runs `generator`; on failure logs, falls back to the tiered suggestions and
/// returns the failure as a warning.
pub async fn generate_with_fallback(
    generator: &dyn SuggestionGenerator,
    request: &SuggestionRequest<'_>,
) -> (GeneratedSuggestions, Option<String>) {
    match generator.generate(request).await {
        Ok(suggestions) if !suggestions.lines.is_empty() => (suggestions, None),
        Ok(_) => {
            warn!("Suggestion backend returned no suggestions; using tiered fallback");
            (
                tiered(request.analysis),
                Some("Suggestion backend returned no suggestions".to_string()),
            )
        }
        Err(e) => {
            warn!("Error generating suggestions: {e}; using tiered fallback");
            (
                tiered(request.analysis),
                Some(format!("Error generating suggestions: {e}")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::{Analyzer, LexiconAnnotator};

    const RESUME: &str = "Software engineer with experience in Python and machine learning";
    const JOB: &str = "Seeking a Python developer with machine learning expertise";

    struct FailingGenerator;

    #[async_trait]
    impl SuggestionGenerator for FailingGenerator {
        async fn generate(
            &self,
            _request: &SuggestionRequest<'_>,
        ) -> Result<GeneratedSuggestions, SuggestionError> {
            Err(LlmError::EmptyContent.into())
        }
    }

    /// Stands in for a successful LLM backend.
    struct CannedGenerator(Vec<&'static str>);

    #[async_trait]
    impl SuggestionGenerator for CannedGenerator {
        async fn generate(
            &self,
            _request: &SuggestionRequest<'_>,
        ) -> Result<GeneratedSuggestions, SuggestionError> {
            Ok(GeneratedSuggestions {
                lines: self.0.iter().map(|l| l.to_string()).collect(),
                source: SuggestionSource::Llm,
            })
        }
    }

    fn analysis() -> Analysis {
        Analyzer::new(Arc::new(LexiconAnnotator::default()))
            .analyze(RESUME, JOB)
            .unwrap()
    }

    #[tokio::test]
    async fn test_tiered_generator_mirrors_analysis() {
        let analysis = analysis();
        let request = SuggestionRequest {
            resume_text: RESUME,
            job_description: JOB,
            analysis: &analysis,
        };
        let (suggestions, warning) =
            generate_with_fallback(&TieredSuggestionGenerator, &request).await;

        assert_eq!(suggestions.source, SuggestionSource::Tiered);
        assert_eq!(suggestions.lines, analysis.suggestion.lines);
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_tiered() {
        let analysis = analysis();
        let request = SuggestionRequest {
            resume_text: RESUME,
            job_description: JOB,
            analysis: &analysis,
        };
        let (suggestions, warning) = generate_with_fallback(&FailingGenerator, &request).await;

        assert_eq!(suggestions.source, SuggestionSource::Tiered);
        assert_eq!(suggestions.lines.len(), 6);
        assert!(warning.unwrap().starts_with("Error generating suggestions"));
    }

    #[tokio::test]
    async fn test_successful_backend_output_is_kept() {
        let analysis = analysis();
        let request = SuggestionRequest {
            resume_text: RESUME,
            job_description: JOB,
            analysis: &analysis,
        };
        let generator = CannedGenerator(vec!["Mention Python projects", "Quantify impact"]);
        let (suggestions, warning) = generate_with_fallback(&generator, &request).await;

        assert_eq!(suggestions.source, SuggestionSource::Llm);
        assert_eq!(
            suggestions.lines,
            vec!["Mention Python projects", "Quantify impact"]
        );
        assert!(warning.is_none());
    }

    #[tokio::test]
    async fn test_empty_backend_output_falls_back() {
        let analysis = analysis();
        let request = SuggestionRequest {
            resume_text: RESUME,
            job_description: JOB,
            analysis: &analysis,
        };
        let (suggestions, warning) =
            generate_with_fallback(&CannedGenerator(vec![]), &request).await;

        assert_eq!(suggestions.source, SuggestionSource::Tiered);
        assert_eq!(suggestions.lines, analysis.suggestion.lines);
        assert!(warning.is_some());
    }

    #[test]
    fn test_prompt_includes_score_and_missing_terms() {
        let analysis = analysis();
        let request = SuggestionRequest {
            resume_text: RESUME,
            job_description: JOB,
            analysis: &analysis,
        };
        let prompt = build_suggestions_prompt(&request);

        assert!(prompt.contains("Keyword match score: 50.00%"));
        assert!(prompt.contains("Seeking, developer, expertise"));
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains(JOB));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_split_generated_lines_drops_blanks_and_caps() {
        let text = "1. Add metrics\n\n  2. Mention Python  \n3\n4\n5\n6\n7\n8\n9";
        let lines = split_generated_lines(text);
        assert_eq!(lines.len(), MAX_GENERATED_LINES);
        assert_eq!(lines[0], "1. Add metrics");
        assert_eq!(lines[1], "2. Mention Python");
    }
}
