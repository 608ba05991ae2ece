//! Tiered suggestions — deterministic guidance derived only from the match score.

use std::fmt;

use serde::Serialize;

/// Lower bound of the Moderate tier (inclusive).
const MODERATE_THRESHOLD: f64 = 30.0;
/// Lower bound of the Strong tier (inclusive).
const STRONG_THRESHOLD: f64 = 60.0;

/// Emitted verbatim, in this order, after the tier line of every suggestion.
pub const GENERIC_SUGGESTIONS: [&str; 5] = [
    "1. Align resume keywords with job description",
    "2. Use industry-specific terminology",
    "3. Quantify achievements with metrics",
    "4. Highlight relevant skills prominently",
    "5. Tailor professional summary to job requirements",
];

/// Qualitative match band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Moderate,
    Strong,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score < MODERATE_THRESHOLD {
            Tier::Low
        } else if score < STRONG_THRESHOLD {
            Tier::Moderate
        } else {
            Tier::Strong
        }
    }

    /// First line of the suggestion block.
    pub fn headline(self) -> &'static str {
        match self {
            Tier::Low => "Low match: Significant resume revision needed",
            Tier::Moderate => "Moderate match: Consider major updates",
            Tier::Strong => "Strong match: Minor refinements suggested",
        }
    }

    /// Short label shown next to the score.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Moderate => "Average",
            Tier::Strong => "Strong",
        }
    }

    /// Display colour for clients that colour-code the score.
    pub fn color(self) -> &'static str {
        match self {
            Tier::Low => "red",
            Tier::Moderate => "orange",
            Tier::Strong => "green",
        }
    }
}

/// Tier line followed by the generic lines. Order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub tier: Tier,
    pub lines: Vec<String>,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

pub fn suggest(score: f64) -> Suggestion {
    let tier = Tier::from_score(score);
    let mut lines = Vec::with_capacity(1 + GENERIC_SUGGESTIONS.len());
    lines.push(tier.headline().to_string());
    lines.extend(GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()));

    Suggestion { tier, lines }
}
