use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::analysis::{Analyzer, LexiconAnnotator};
use crate::config::Config;
use crate::generation::suggester::{
    LlmSuggestionGenerator, SuggestionGenerator, TieredSuggestionGenerator,
};
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Owns the process-wide annotator; read-only across requests.
    pub analyzer: Analyzer,
    /// Pluggable suggestion backend. Default: TieredSuggestionGenerator.
    /// Swap via ENABLE_LLM_SUGGESTIONS + ANTHROPIC_API_KEY.
    pub suggester: Arc<dyn SuggestionGenerator>,
    /// Present only when ANTHROPIC_API_KEY is set.
    pub llm: Option<LlmClient>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let annotator = Arc::new(LexiconAnnotator::new(config.max_annotation_chars));
        let analyzer = Analyzer::new(annotator);
        info!(
            "Lexicon annotator initialized (max {} chars)",
            config.max_annotation_chars
        );

        let llm = match &config.anthropic_api_key {
            Some(key) => {
                let client = LlmClient::new(key.clone(), config.llm_model.clone())?;
                info!("LLM client initialized (model: {})", client.model());
                Some(client)
            }
            None => None,
        };

        let suggester: Arc<dyn SuggestionGenerator> = match (&llm, config.enable_llm_suggestions) {
            (Some(client), true) => Arc::new(LlmSuggestionGenerator(client.clone())),
            _ => Arc::new(TieredSuggestionGenerator),
        };
        info!(
            "Suggestion backend: {}",
            if config.llm_suggestions_enabled() {
                "llm"
            } else {
                "tiered"
            }
        );

        Ok(AppState {
            config,
            analyzer,
            suggester,
            llm,
        })
    }
}
