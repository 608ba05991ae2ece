//! Keyword Extractor — turns annotated tokens into a deduplicated `TermSet`.
//!
//! Extraction never fails: an annotator error degrades to an empty set plus a
//! warning the caller can surface.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::analysis::annotator::{Annotator, PartOfSpeech, Token};

/// Shortest token kept as a term, in characters.
const MIN_TERM_CHARS: usize = 3;

/// Deduplicated, case-sensitive set of extracted terms. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermSet(BTreeSet<String>);

impl TermSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Terms present in both sets, in sorted order.
    pub fn intersection<'a>(&'a self, other: &'a TermSet) -> impl Iterator<Item = &'a str> {
        self.0.intersection(&other.0).map(String::as_str)
    }

    /// Terms in `self` that `other` lacks, in sorted order.
    pub fn difference<'a>(&'a self, other: &'a TermSet) -> impl Iterator<Item = &'a str> {
        self.0.difference(&other.0).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Which tokens survive the part-of-speech filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// NOUN, VERB and ADJ tokens. Used for match scoring.
    Keywords,
    /// NOUN tokens plus every named entity regardless of tag. Used for the
    /// resume "skills" list fed to prompts.
    EntitiesAndNouns,
}

impl ExtractionMode {
    fn retains(self, token: &Token) -> bool {
        let pos_ok = match self {
            ExtractionMode::Keywords => matches!(
                token.pos,
                PartOfSpeech::Noun | PartOfSpeech::Verb | PartOfSpeech::Adjective
            ),
            ExtractionMode::EntitiesAndNouns => {
                token.is_entity || token.pos == PartOfSpeech::Noun
            }
        };

        pos_ok && !token.is_stop && token.text.chars().count() >= MIN_TERM_CHARS
    }
}

/// Result of one extraction call. `warning` is set when the annotator failed
/// and `terms` is therefore empty.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub terms: TermSet,
    pub warning: Option<String>,
}

/// Wraps the shared annotator. Cheap to clone.
#[derive(Clone)]
pub struct KeywordExtractor {
    annotator: Arc<dyn Annotator>,
}

impl KeywordExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self { annotator }
    }

    pub fn extract(&self, text: &str, mode: ExtractionMode) -> Extraction {
        if text.is_empty() {
            return Extraction::default();
        }

        match self.annotator.annotate(text) {
            Ok(tokens) => Extraction {
                terms: tokens
                    .into_iter()
                    .filter(|t| mode.retains(t))
                    .map(|t| t.text)
                    .collect(),
                warning: None,
            },
            Err(e) => {
                warn!("Keyword extraction error: {e}");
                Extraction {
                    terms: TermSet::default(),
                    warning: Some(format!("Keyword extraction error: {e}")),
                }
            }
        }
    }
}
