//! Section Rewriter — rewrites one resume section at a time against the job
//! posting, constrained to claims from the fact corpus.
//!
//! Structural rules differ by section class (summary / experience / skills).
//! Compliance with the bullet-count and skill-tier policies depends on the
//! external model and cannot be mechanically guaranteed here — the prompt
//! encodes the rules, the sanitizer cleans up the shape.

use tracing::info;

use crate::catalog::JobTarget;
use crate::errors::AppError;
use crate::generation::prompts::{
    EXPERIENCE_RULES, REWRITE_PROMPT_TEMPLATE, REWRITE_SYSTEM, SKILLS_RULES, SUMMARY_RULES,
};
use crate::llm_client::prompts::{FACT_GROUNDING_INSTRUCTION, LATEX_OUTPUT_INSTRUCTION};
use crate::llm_client::CompletionClient;
use crate::sanitize::strip_markdown_lines;

/// Section classes with distinct structural rewrite rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionClass {
    /// Minimal-change prose wrapped in a single `\resumeSubItem{}{...}`.
    Summary,
    /// Bullet lists bounded to 2–3 `\item`s per entry.
    Experience,
    /// Additive-only, comma-separated skill categories.
    Skills,
}

impl SectionClass {
    fn rules(self) -> &'static str {
        match self {
            SectionClass::Summary => SUMMARY_RULES,
            SectionClass::Experience => EXPERIENCE_RULES,
            SectionClass::Skills => SKILLS_RULES,
        }
    }
}

/// Classifies a section by its catalog key. Everything that is not a summary
/// or skills section gets the experience/project bullet rules — that covers
/// the per-project sections merged in from the selected content blocks.
pub fn classify_section(name: &str) -> SectionClass {
    let upper = name.to_uppercase();
    if upper.contains("SUMMARY") || upper.contains("OBJECTIVE") {
        SectionClass::Summary
    } else if upper.contains("SKILL") {
        SectionClass::Skills
    } else {
        SectionClass::Experience
    }
}

/// Rewrites one section's LaTeX content for the target job. One LLM attempt;
/// the response is passed through `strip_markdown_lines` so stray fence
/// lines never reach the template.
pub async fn rewrite_section(
    llm: &dyn CompletionClient,
    section_name: &str,
    current_markup: &str,
    job: &JobTarget,
    fact_corpus: &str,
) -> Result<String, AppError> {
    let class = classify_section(section_name);

    let prompt = REWRITE_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", FACT_GROUNDING_INSTRUCTION)
        .replace("{output_instruction}", LATEX_OUTPUT_INSTRUCTION)
        .replace("{fact_corpus}", fact_corpus)
        .replace("{job_title}", &job.job_title)
        .replace("{company}", &job.company)
        .replace("{location}", job.location_or_default())
        .replace("{description}", &job.description)
        .replace("{section_name}", section_name)
        .replace("{current_markup}", current_markup)
        .replace("{section_rules}", class.rules());

    let raw = llm
        .complete(&prompt, REWRITE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Rewrite of section '{section_name}' failed: {e}")))?;

    info!("Rewrote section '{section_name}' ({class:?})");
    Ok(strip_markdown_lines(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Stub that records the prompt so tests can assert which rules were
    /// embedded.
    struct RecordingStub {
        response: String,
        seen_prompt: Mutex<Option<String>>,
    }

    impl RecordingStub {
        fn returning(response: &str) -> Self {
            Self {
                response: response.to_string(),
                seen_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for RecordingStub {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            *self.seen_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    fn job() -> JobTarget {
        JobTarget {
            job_title: "Data Engineer".to_string(),
            company: "Acme".to_string(),
            location: None,
            description: "Pipelines and warehousing.".to_string(),
        }
    }

    #[test]
    fn test_classify_summary_sections() {
        assert_eq!(classify_section("EXECUTIVE_SUMMARY"), SectionClass::Summary);
        assert_eq!(classify_section("career_objective"), SectionClass::Summary);
    }

    #[test]
    fn test_classify_skills_sections() {
        assert_eq!(classify_section("SKILLS"), SectionClass::Skills);
        assert_eq!(classify_section("Technical_Skills"), SectionClass::Skills);
    }

    #[test]
    fn test_classify_everything_else_as_experience() {
        assert_eq!(classify_section("EXPERIENCE"), SectionClass::Experience);
        assert_eq!(classify_section("PROJECTS_ESG"), SectionClass::Experience);
        assert_eq!(classify_section("EDUCATION"), SectionClass::Experience);
    }

    #[tokio::test]
    async fn test_rewrite_strips_fence_lines_from_response() {
        let stub = RecordingStub::returning("```latex\n\\item Built pipelines\n```");
        let out = rewrite_section(&stub, "EXPERIENCE", "\\item old", &job(), "facts")
            .await
            .unwrap();
        assert_eq!(out, "\\item Built pipelines");
    }

    #[tokio::test]
    async fn test_rewrite_prompt_embeds_skills_rules_for_skills_section() {
        let stub = RecordingStub::returning("\\resumeSubItem{Programming}{Rust, SQL}");
        rewrite_section(&stub, "SKILLS", "\\resumeSubItem{Programming}{Rust}", &job(), "facts")
            .await
            .unwrap();

        let prompt = stub.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("never pipes"));
        assert!(!prompt.contains("NEVER more"), "experience rules must not leak in");
    }

    #[tokio::test]
    async fn test_rewrite_prompt_embeds_corpus_and_current_markup() {
        let stub = RecordingStub::returning("\\item new");
        rewrite_section(&stub, "PROJECTS_A", "\\item the old bullet", &job(), "verified corpus text")
            .await
            .unwrap();

        let prompt = stub.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("verified corpus text"));
        assert!(prompt.contains("\\item the old bullet"));
        assert!(prompt.contains("NEVER more"), "experience rules expected");
    }

    #[tokio::test]
    async fn test_rewrite_accepts_two_bullets_within_policy() {
        // 2 bullets is within the [2,3] policy window. A response with 4
        // bullets is a model-side policy violation the core cannot
        // mechanically enforce — documented limitation, no hard assertion.
        let stub = RecordingStub::returning("\\item One\n\\item Two");
        let out = rewrite_section(
            &stub,
            "EXPERIENCE",
            "\\item a\n\\item b\n\\item c\n\\item d\n\\item e",
            &job(),
            "facts",
        )
        .await
        .unwrap();
        assert_eq!(out.matches("\\item").count(), 2);
    }
}
