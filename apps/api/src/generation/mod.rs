// Generative layer — optional, non-authoritative.
// Implements: LLM-backed improvement suggestions (with tiered fallback) and cover letters.
// All LLM calls go through llm_client; no direct API calls here.

pub mod cover_letter;
pub mod handlers;
pub mod prompts;
pub mod suggester;
