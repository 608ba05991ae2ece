//! Match Scoring — directional containment of job terms in resume terms.
//!
//! score = |resume ∩ job| / |job| × 100, rounded half-up to 2 decimals.
//! Asymmetric: resume terms the job never mentions do not
//! lower the score. An empty job set scores 0.

use crate::analysis::keywords::TermSet;

/// Score plus the two term sets that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// 0.0 – 100.0, two decimal places.
    pub score: f64,
    pub resume_terms: TermSet,
    pub job_terms: TermSet,
}

impl MatchResult {
    /// Job terms the resume covers, sorted.
    pub fn matched_terms(&self) -> Vec<String> {
        self.job_terms
            .intersection(&self.resume_terms)
            .map(String::from)
            .collect()
    }

    /// Job terms the resume lacks, sorted.
    pub fn missing_terms(&self) -> Vec<String> {
        self.job_terms
            .difference(&self.resume_terms)
            .map(String::from)
            .collect()
    }
}

/// Scores `resume_terms` against `job_terms`. Never fails, never divides by zero.
pub fn score_match(resume_terms: TermSet, job_terms: TermSet) -> MatchResult {
    let matched = job_terms.intersection(&resume_terms).count();
    let score = containment_percentage(matched, job_terms.len());

    MatchResult {
        score,
        resume_terms,
        job_terms,
    }
}

/// `100 * matched / total` rounded half-up to 2 decimals, in integer hundredths
/// so that exact halves are not lost to binary floating point.
fn containment_percentage(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let matched = matched.min(total) as u64;
    let total = total as u64;
    let hundredths = (matched * 20_000 + total) / (2 * total);
    hundredths as f64 / 100.0
}
