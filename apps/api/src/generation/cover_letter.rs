//! Cover letter generation — drafts a letter that highlights the resume's skill terms.

use tracing::info;

use crate::analysis::keywords::TermSet;
use crate::errors::AppError;
use crate::generation::prompts::{COVER_LETTER_MAX_TOKENS, COVER_LETTER_PROMPT_TEMPLATE};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, PLAIN_TEXT_SYSTEM};
use crate::llm_client::LlmClient;

/// Caps the skills list so the prompt stays small for long resumes.
const MAX_PROMPT_SKILLS: usize = 40;

pub fn build_cover_letter_prompt(job_description: &str, skills: &TermSet) -> String {
    let skills: Vec<&str> = skills.iter().take(MAX_PROMPT_SKILLS).collect();

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{skills}", &skills.join(", "))
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
}

pub async fn generate_cover_letter(
    llm: &LlmClient,
    job_description: &str,
    skills: &TermSet,
) -> Result<String, AppError> {
    let prompt = build_cover_letter_prompt(job_description, skills);
    info!("Generating cover letter with {} skill terms", skills.len());

    llm.call_text(&prompt, PLAIN_TEXT_SYSTEM, COVER_LETTER_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))
}
