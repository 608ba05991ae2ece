//! Analyzer — runs the full matching pipeline for one (resume, job description) pair.
//!
//! Flow: reject empty input → normalize → extract (resume, job) → score → suggest.
//!
//! Annotation failures never abort the analysis: the affected term set is empty,
//! the failure is carried in `Analysis::warnings`, and scoring continues with
//! whatever the other extraction produced.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::analysis::annotator::Annotator;
use crate::analysis::keywords::{ExtractionMode, KeywordExtractor, TermSet};
use crate::analysis::normalizer::normalize;
use crate::analysis::scoring::{score_match, MatchResult};
use crate::analysis::suggestions::{suggest, Suggestion};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Please provide resume text")]
    EmptyResume,

    #[error("Please provide a job description")]
    EmptyJobDescription,
}

/// Everything one analysis produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub result: MatchResult,
    pub suggestion: Suggestion,
    /// Entities and nouns from the resume; fed to generative prompts as skills.
    pub resume_skills: TermSet,
    pub warnings: Vec<String>,
}

/// Stateless from the caller's side; holds only the shared extractor.
#[derive(Clone)]
pub struct Analyzer {
    extractor: KeywordExtractor,
}

impl Analyzer {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            extractor: KeywordExtractor::new(annotator),
        }
    }

    pub fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<Analysis, AnalysisError> {
        if resume_text.trim().is_empty() {
            return Err(AnalysisError::EmptyResume);
        }
        if job_description.trim().is_empty() {
            return Err(AnalysisError::EmptyJobDescription);
        }

        let resume_text = normalize(resume_text);
        let job_description = normalize(job_description);

        let mut warnings = Vec::new();

        let resume = self.extractor.extract(&resume_text, ExtractionMode::Keywords);
        warnings.extend(resume.warning.map(|w| format!("resume: {w}")));

        let job = self
            .extractor
            .extract(&job_description, ExtractionMode::Keywords);
        warnings.extend(job.warning.map(|w| format!("job description: {w}")));

        let skills = self
            .extractor
            .extract(&resume_text, ExtractionMode::EntitiesAndNouns);
        warnings.extend(skills.warning.map(|w| format!("resume skills: {w}")));

        debug!(
            "Extracted {} resume terms, {} job terms, {} resume skills",
            resume.terms.len(),
            job.terms.len(),
            skills.terms.len()
        );

        let result = score_match(resume.terms, job.terms);
        let suggestion = suggest(result.score);

        info!(
            "Match score: {:.2} ({:?}), {} warning(s)",
            result.score,
            suggestion.tier,
            warnings.len()
        );

        Ok(Analysis {
            result,
            suggestion,
            resume_skills: skills.terms,
            warnings,
        })
    }
}
