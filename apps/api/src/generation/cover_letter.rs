//! Cover-letter drafting — a single constrained generation call for the
//! letter body, merged with escaped job fields for the template render.

use tracing::info;

use crate::catalog::{JobTarget, SectionSet};
use crate::errors::AppError;
use crate::generation::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::llm_client::prompts::{FACT_GROUNDING_INSTRUCTION, LATEX_OUTPUT_INSTRUCTION};
use crate::llm_client::CompletionClient;
use crate::sanitize::{escape_reserved, strip_fences};

/// Drafts the cover-letter body and assembles the full section set for the
/// cover-letter template: `job_title`, `company_info`, `cover_letter_body`.
///
/// The body comes back as raw LaTeX prose (2–4 paragraphs, no salutation or
/// signature); the job fields are literal prose and get reserved characters
/// escaped here. One attempt, no retry.
pub async fn draft_cover_letter_sections(
    llm: &dyn CompletionClient,
    job: &JobTarget,
    fact_corpus: &str,
) -> Result<SectionSet, AppError> {
    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", FACT_GROUNDING_INSTRUCTION)
        .replace("{output_instruction}", LATEX_OUTPUT_INSTRUCTION)
        .replace("{fact_corpus}", fact_corpus)
        .replace("{job_title}", &job.job_title)
        .replace("{company}", &job.company)
        .replace("{location}", job.location_or_default())
        .replace("{description}", &job.description);

    let raw = llm
        .complete(&prompt, COVER_LETTER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Cover-letter call failed: {e}")))?;

    let body = strip_fences(&raw);
    info!("Drafted cover-letter body ({} chars)", body.len());

    let company_info = match &job.location {
        Some(location) => format!(
            "{} \\\\ {}",
            escape_reserved(&job.company),
            escape_reserved(location)
        ),
        None => escape_reserved(&job.company),
    };

    let mut sections = SectionSet::new();
    sections.insert("job_title".to_string(), escape_reserved(&job.job_title));
    sections.insert("company_info".to_string(), company_info);
    sections.insert("cover_letter_body".to_string(), body);
    Ok(sections)
}
