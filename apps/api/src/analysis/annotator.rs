//! Linguistic annotation seam — tokenization plus part-of-speech, stop-word and
//! named-entity flags.
//!
//! `AppState` holds an `Arc<dyn Annotator>` built once at startup and shared
//! read-only across requests. Default: `LexiconAnnotator` (see `lexicon.rs`).

use thiserror::Error;

/// Coarse part-of-speech tags. Proper nouns fold into `Noun` and carry
/// `is_entity = true` instead of a separate tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Auxiliary,
    Conjunction,
    Particle,
    Numeral,
    Punctuation,
}

/// A single annotated token. `text` is the surface form exactly as it appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    pub is_stop: bool,
    pub is_entity: bool,
}

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("text of {len} characters exceeds the annotator limit of {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("annotator failed: {0}")]
    Failed(String),
}

/// The annotator trait. Implementations own whatever lexicons or model weights
/// they need and must not mutate them per call.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<Vec<Token>, AnnotationError>;
}
