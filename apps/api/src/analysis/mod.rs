// Resume analysis core.
// Implements: normalization, annotation, keyword extraction, match scoring, tiered suggestions.
// Pure and synchronous. HTTP handlers run `Analyzer::analyze` inside spawn_blocking.

pub mod analyzer;
pub mod annotator;
pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod normalizer;
pub mod scoring;
pub mod suggestions;

// Re-export the public API consumed by other modules (state, generation).
pub use analyzer::{Analysis, AnalysisError, Analyzer};
pub use lexicon::LexiconAnnotator;
