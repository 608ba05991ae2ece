//! Text normalization applied to every document before annotation.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapses every run of whitespace (spaces, tabs, newlines) into a single space
/// and trims both ends. Total over any input; empty in, empty out.
pub fn normalize(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_mixed_whitespace() {
        assert_eq!(normalize("a   b\n\tc"), "a b c");
    }

    #[test]
    fn test_trims_leading_and_trailing() {
        assert_eq!(normalize("  \n Rust engineer \t "), "Rust engineer");
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_page_breaks_become_spaces() {
        let decoded = "Page one text\nPage two text\n";
        assert_eq!(normalize(decoded), "Page one text Page two text");
    }
}
