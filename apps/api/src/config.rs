use anyhow::{Context, Result};

use crate::analysis::lexicon::DEFAULT_MAX_CHARS;
use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; the LLM collaborator stays off without a key.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub enable_llm_suggestions: bool,
    pub max_upload_bytes: usize,
    pub max_annotation_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            enable_llm_suggestions: parse_env("ENABLE_LLM_SUGGESTIONS", false)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            max_annotation_chars: parse_env("MAX_ANNOTATION_CHARS", DEFAULT_MAX_CHARS)?,
        })
    }

    /// True when LLM-backed suggestions are requested and a key is present.
    pub fn llm_suggestions_enabled(&self) -> bool {
        self.enable_llm_suggestions && self.anthropic_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            llm_model: DEFAULT_MODEL.to_string(),
            enable_llm_suggestions: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_annotation_chars: DEFAULT_MAX_CHARS,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_suggestions_need_key_and_flag() {
        let mut config = Config {
            enable_llm_suggestions: true,
            ..Config::default()
        };
        assert!(!config.llm_suggestions_enabled());

        config.anthropic_api_key = Some("key".to_string());
        assert!(config.llm_suggestions_enabled());

        config.enable_llm_suggestions = false;
        assert!(!config.llm_suggestions_enabled());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("RESUME_OPTIMIZER_TEST_UNSET_VAR", 4242).unwrap();
        assert_eq!(value, 4242);
    }
}
