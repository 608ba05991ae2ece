//! Lexicon Annotator — deterministic, rule-based English tagger.
//!
//! Pipeline per word (UAX #29 word boundaries via `unicode-segmentation`):
//! 1. numerals → NUM
//! 2. closed-class lexicon (determiners, pronouns, adpositions, auxiliaries, ...)
//! 3. open-class lexicons (known nouns, verbs, adjectives)
//! 4. suffix rules (-tion → NOUN, -ing → VERB, -ous → ADJ, -ly → ADV, ...)
//! 5. fallback → NOUN
//!
//! Capitalised words that are not sentence-initial, acronyms, and camel-case words
//! (`JavaScript`, `iOS`) are tagged NOUN and flagged as named entities.
//! Contraction and possessive endings (`n't`, `'s`, `'re`, ...) become separate
//! stop-word particles.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::annotator::{AnnotationError, Annotator, PartOfSpeech, Token};

/// Default input limit in characters. Longer texts are refused, not truncated.
pub const DEFAULT_MAX_CHARS: usize = 1_000_000;

// ────────────────────────────────────────────────────────────────────────────
// Lexicons (process-wide, built on first use)
// ────────────────────────────────────────────────────────────────────────────

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
        "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
        "anyone", "anything", "are", "around", "as", "at", "be", "became", "because", "become",
        "been", "before", "being", "below", "between", "both", "but", "by", "can", "cannot",
        "could", "did", "do", "does", "doing", "done", "down", "during", "each", "either",
        "else", "enough", "even", "ever", "every", "everything", "few", "for", "from",
        "further", "get", "give", "had", "has", "have", "having", "he", "hence", "her", "here",
        "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "least", "less", "made", "make", "many", "may",
        "me", "might", "mine", "more", "most", "mostly", "much", "must", "my", "myself",
        "neither", "never", "nevertheless", "next", "no", "nobody", "none", "nor", "not",
        "nothing", "now", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
        "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "per", "perhaps", "please", "put", "quite", "rather", "really", "same", "say", "see",
        "seem", "seemed", "seems", "several", "she", "should", "show", "since", "so", "some",
        "someone", "something", "sometimes", "still", "such", "than", "that", "the", "their",
        "theirs", "them", "themselves", "then", "there", "therefore", "these", "they", "this",
        "those", "though", "through", "throughout", "thus", "to", "together", "too", "toward",
        "towards", "under", "until", "up", "upon", "us", "used", "using", "various", "very",
        "via", "was", "we", "well", "were", "what", "whatever", "when", "whenever", "where",
        "whether", "which", "while", "who", "whoever", "whole", "whom", "whose", "why", "will",
        "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
        "yourselves",
    ]
    .into_iter()
    .collect()
});

static CLOSED_CLASS: Lazy<HashMap<&'static str, PartOfSpeech>> = Lazy::new(|| {
    use PartOfSpeech::*;

    let mut map = HashMap::new();
    let groups: [(&[&'static str], PartOfSpeech); 8] = [
        (
            &[
                "a", "an", "the", "this", "that", "these", "those", "each", "every", "any",
                "some", "no", "all", "both", "either", "neither", "another", "such",
            ],
            Determiner,
        ),
        (
            &[
                "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "he",
                "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
                "we", "us", "our", "ours", "ourselves", "they", "them", "their", "theirs",
                "themselves", "who", "whom", "whose", "what", "which", "anyone", "someone",
                "everyone", "nobody", "nothing", "something", "everything", "anything",
            ],
            Pronoun,
        ),
        (
            &[
                "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
                "through", "during", "before", "after", "above", "below", "to", "from", "up",
                "down", "of", "off", "over", "under", "across", "among", "around", "via",
                "within", "without", "toward", "towards", "upon", "per", "like", "onto",
            ],
            Adposition,
        ),
        (
            &[
                "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had",
                "having", "do", "does", "did", "will", "would", "shall", "should", "can",
                "could", "may", "might", "must",
            ],
            Auxiliary,
        ),
        (
            &[
                "and", "or", "but", "nor", "yet", "so", "because", "although", "though",
                "while", "if", "unless", "whether", "since", "until", "whereas",
            ],
            Conjunction,
        ),
        (&["not", "n't", "'s", "as"], Particle),
        (
            &[
                "very", "also", "too", "just", "only", "then", "there", "here", "now", "often",
                "always", "never", "well", "again", "already", "still", "even", "ever",
                "however", "therefore", "together", "quite", "rather", "almost", "soon",
                "when", "where", "why", "how",
            ],
            Adverb,
        ),
        (
            &[
                "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
                "hundred", "thousand", "million", "billion",
            ],
            Numeral,
        ),
    ];
    for (words, pos) in groups {
        for word in words {
            map.insert(*word, pos);
        }
    }
    map
});

/// Nouns that suffix rules would otherwise mis-tag (mostly -ing/-ed/-ly forms).
static KNOWN_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "learning", "engineering", "programming", "marketing", "training", "testing",
        "computing", "accounting", "networking", "manufacturing", "consulting", "banking",
        "modeling", "modelling", "building", "funding", "hiring", "onboarding", "pricing",
        "reporting", "scheduling", "planning", "processing", "staffing", "budgeting",
        "writing", "design", "support", "experience", "knowledge", "degree", "need", "needs",
        "work", "focus", "impact", "lead", "release", "review", "change", "control",
        "supply", "family", "assembly", "ally", "butterfly", "rally", "reply", "anomaly",
    ]
    .into_iter()
    .collect()
});

static KNOWN_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "seek", "build", "develop", "create", "manage", "deliver", "drive", "own", "ship",
        "launch", "implement", "maintain", "improve", "optimize", "analyze", "analyse",
        "collaborate", "coordinate", "communicate", "mentor", "architect", "deploy",
        "automate", "debug", "scale", "integrate", "write", "test", "join", "apply",
        "ensure", "define", "lead", "led", "built", "wrote", "ran", "run", "grew", "grow",
        "reduce", "increase", "partner", "contribute", "evaluate", "investigate", "publish",
        "propose", "support", "require", "prefer", "work", "achieve", "identify", "solve",
        "translate", "migrate", "design", "review", "plan", "spearhead", "oversee",
    ]
    .into_iter()
    .collect()
});

static KNOWN_ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "senior", "junior", "strong", "excellent", "good", "great", "new", "large", "small",
        "fast", "deep", "solid", "proven", "key", "main", "high", "low", "full", "remote",
        "hybrid", "agile", "technical", "relevant", "preferred", "required", "cross",
        "scalable", "robust", "reliable", "distributed", "modern", "complex", "critical",
        "open", "best", "better", "big", "top", "native", "hands", "detail", "oriented",
        "motivated", "skilled", "independent", "effective", "successful", "specific",
    ]
    .into_iter()
    .collect()
});

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence", "ism", "ist", "ogy",
    "er", "or",
];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ular",
];

/// Contraction and possessive endings split off their stem, matched after
/// folding `’` to `'`.
const CLITICS: &[&str] = &["n't", "'s", "'re", "'ll", "'ve", "'d", "'m"];

/// Punctuation after which the next word starts a new clause.
const CLAUSE_BREAKS: &[char] = &['.', '!', '?', ':', ';', '•', '●', '▪', '◦', '‣', '*'];

// ────────────────────────────────────────────────────────────────────────────
// LexiconAnnotator
// ────────────────────────────────────────────────────────────────────────────

/// Pure-Rust annotator. Fast, deterministic, no model download.
#[derive(Debug, Clone)]
pub struct LexiconAnnotator {
    max_chars: usize,
}

impl LexiconAnnotator {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Default for LexiconAnnotator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl Annotator for LexiconAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Token>, AnnotationError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(AnnotationError::TextTooLong {
                len,
                max: self.max_chars,
            });
        }

        let mut tokens = Vec::new();
        let mut sentence_start = true;

        for piece in text.split_word_bounds() {
            if piece.trim().is_empty() {
                continue;
            }

            if !piece.chars().any(char::is_alphanumeric) {
                if piece.contains(CLAUSE_BREAKS) {
                    sentence_start = true;
                }
                tokens.push(Token {
                    text: piece.to_string(),
                    pos: PartOfSpeech::Punctuation,
                    is_stop: false,
                    is_entity: false,
                });
                continue;
            }

            let (stem, clitic) = split_clitic(piece);
            let (pos, is_entity) = tag_word(stem, sentence_start);
            tokens.push(Token {
                text: stem.to_string(),
                pos,
                is_stop: STOP_WORDS.contains(stem.to_lowercase().as_str()),
                is_entity,
            });
            if let Some(clitic) = clitic {
                tokens.push(Token {
                    text: clitic.to_string(),
                    pos: PartOfSpeech::Particle,
                    is_stop: true,
                    is_entity: false,
                });
            }
            sentence_start = false;
        }

        Ok(tokens)
    }
}

/// Splits `Acme's` into `Acme` + `'s` and `don't` into `do` + `n't`.
/// Words without a known clitic ending, or that would leave an empty stem, are
/// returned whole.
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    let folded = word.replace('\u{2019}', "'").to_lowercase();
    for clitic in CLITICS {
        if !folded.ends_with(clitic) {
            continue;
        }
        let clitic_chars = clitic.chars().count();
        let stem_chars = word.chars().count().saturating_sub(clitic_chars);
        if stem_chars == 0 {
            break;
        }
        let split_at = word
            .char_indices()
            .nth(stem_chars)
            .map_or(word.len(), |(i, _)| i);
        let (stem, tail) = word.split_at(split_at);
        if stem.chars().any(char::is_alphanumeric) {
            return (stem, Some(tail));
        }
        break;
    }
    (word, None)
}

/// Tags a single word. Returns the part of speech and the named-entity flag.
fn tag_word(word: &str, sentence_start: bool) -> (PartOfSpeech, bool) {
    if is_numeric(word) {
        return (PartOfSpeech::Numeral, false);
    }

    let lower = word.to_lowercase();

    if let Some(pos) = CLOSED_CLASS.get(lower.as_str()) {
        return (*pos, false);
    }

    if is_acronym(word) || has_inner_uppercase(word) {
        return (PartOfSpeech::Noun, true);
    }

    if starts_uppercase(word) && !sentence_start {
        return (PartOfSpeech::Noun, true);
    }

    (tag_open_class(&lower), false)
}

fn tag_open_class(lower: &str) -> PartOfSpeech {
    if KNOWN_NOUNS.contains(lower) {
        return PartOfSpeech::Noun;
    }
    if KNOWN_VERBS.contains(lower) {
        return PartOfSpeech::Verb;
    }
    if KNOWN_ADJECTIVES.contains(lower) {
        return PartOfSpeech::Adjective;
    }

    let len = lower.chars().count();

    if len > 4 && lower.ends_with("ly") {
        return PartOfSpeech::Adverb;
    }
    if len > 5 && (lower.ends_with("ing") || lower.ends_with("ize")) {
        return PartOfSpeech::Verb;
    }
    if len > 4 && lower.ends_with("ed") {
        return PartOfSpeech::Verb;
    }
    if len > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PartOfSpeech::Adjective;
    }
    if len > 4 && NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return PartOfSpeech::Noun;
    }

    PartOfSpeech::Noun
}

fn is_numeric(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | '+'))
}

/// `AWS`, `SQL`, `K8S`: two or more characters, every letter uppercase.
fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2
        && word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .all(|c| c.is_uppercase() || c.is_ascii_digit())
}

/// `JavaScript`, `iOS`, `PostgreSQL`.
fn has_inner_uppercase(word: &str) -> bool {
    word.chars().skip(1).any(char::is_uppercase) && word.chars().any(char::is_lowercase)
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
