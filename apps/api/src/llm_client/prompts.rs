// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it; this file holds only cross-cutting pieces.

/// System prompt fragment for plain-prose output.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a concise, practical career coach. \
    Respond in plain text only. \
    Do NOT use markdown headings or code fences. \
    Do NOT include apologies or meta commentary.";

/// Appended to prompts that embed user-supplied documents.
pub const GROUNDING_INSTRUCTION: &str = "\
    Base every statement on the resume and job description provided. \
    Do NOT invent employers, dates, degrees, or metrics that are not in the resume.";
