// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Improvement-suggestion prompt template.
/// Replace: {grounding_instruction}, {score}, {missing_terms}, {resume_text}, {job_description}
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job description and suggest improvements.

{grounding_instruction}

Keyword match score: {score}%
Job keywords missing from the resume: {missing_terms}

Resume:
{resume_text}

Job Description:
{job_description}

Provide specific suggestions to enhance the resume's match and impact.
Return one suggestion per line, numbered "1.", "2.", ... with at most 7 lines."#;

/// Cover-letter prompt template.
/// Replace: {grounding_instruction}, {job_description}, {skills}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional cover letter for a job with the following description:
{job_description}

Key skills to highlight: {skills}

{grounding_instruction}"#;

pub const SUGGESTIONS_MAX_TOKENS: u32 = 300;
pub const COVER_LETTER_MAX_TOKENS: u32 = 500;
