// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for content-block selection — enforces bare-JSON output.
pub const SELECTION_SYSTEM: &str = "You are an expert resume optimizer. \
    Return ONLY a JSON array of exactly 4 project keys. \
    No markdown, no explanations, no LaTeX.";

/// Selection prompt template.
/// Replace: {job_title}, {company}, {location}, {description}, {blocks}
pub const SELECTION_PROMPT_TEMPLATE: &str = r#"The applicant is applying for the job below.

--- JOB INPUT ---
- Job Title: {job_title}
- Company: {company}
- Location: {location}
- Job Description:
{description}

--- CANDIDATE PROJECTS ---
You are given LaTeX-formatted projects, each tagged with its key in square brackets.

--- YOUR TASK ---
Select exactly 4 unique projects from this set that are the most strategically relevant to the job, based on the job title and job description above.

--- SELECTION CRITERIA (MUST FOLLOW STRICTLY) ---

1. Relevance first: choose projects demonstrating direct alignment with the job's required skills, tools, methods, domain, or deliverables — overlapping technologies, domain similarity, shared focus (modeling, automation, analytics, optimization, deployment).
2. No keyword matching: do not rely on surface-level keyword overlap. Analyze what problems the company is solving and which project contributions reflect the right skills.
3. Exclude weak matches: no outdated or non-relevant tech stacks, no dashboard-only work unless the job emphasizes reporting, nothing lacking model development or coding if the job requires technical depth.
4. Maximize strategic fit: prefer end-to-end projects (problem framing through deployment) with transferable skills and measurable outcomes.
5. Avoid redundancy: do not pick multiple projects covering the same skill unless the job makes it a core focus. Each selection must add unique value.
6. Think like a hiring manager shortlisting the applicant for this specific role.

--- OUTPUT FORMAT ---
Return a JSON array of only the selected 4 project keys, ordered by descending relevance.
Example:
["PROJECTS_CLINICAL", "PROJECTS_ESG", "PROJECTS_AMAZON", "PROJECTS_CHATBOT"]

DO NOT return any explanation, LaTeX, markdown, or text — ONLY the raw JSON array of 4 keys.

--- PROJECTS ---
{blocks}"#;

/// System prompt for section rewriting — raw LaTeX only.
pub const REWRITE_SYSTEM: &str = "You ONLY return raw LaTeX code using \\item \
    or \\resumeSubItem. Never add explanations or markdown formatting.";

/// Section rewrite prompt template.
/// Replace: {grounding_instruction}, {output_instruction}, {fact_corpus},
///          {job_title}, {company}, {location}, {description},
///          {section_name}, {current_markup}, {section_rules}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"You are a LaTeX resume editor. Rewrite the section below only as far as needed to match the job more closely, preserving formatting, section structure, and tone.

{grounding_instruction}

--- PERSONAL PROFILE ---
{fact_corpus}

--- JOB INPUT ---
- Job Title: {job_title}
- Company: {company}
- Location: {location}
- Job Description:
{description}

--- CURRENT SECTION ---
Below is the applicant's current "{section_name}" section:
{current_markup}

--- OUTPUT RULES ---
{output_instruction}
Maintain the original structure and spacing. Only update bullet or sentence contents where it improves the match. The full resume must stay within 2 pages — keep each bullet about as long as the original.

--- SECTION-SPECIFIC RULES ---
{section_rules}

Return only the updated LaTeX-formatted block. No extra explanation."#;

/// Rules for summary-class sections: minimal change, fixed wrapper.
pub const SUMMARY_RULES: &str = "\
    - Keep the section very close to the original unless changing it adds clear value.\n\
    - The output MUST remain wrapped in a single \\resumeSubItem{}{...} item.";

/// Rules for experience/project-class sections: bounded bullet counts.
pub const EXPERIENCE_RULES: &str = "\
    - Return exactly 2 bullet points per entry; only if truly essential you may use up to 3, NEVER more.\n\
    - Combine the important ideas of longer originals into fewer bullets without losing meaning or keywords.\n\
    - Each bullet uses \\item and starts with a strong action verb.\n\
    - Make results quantifiable where possible and use job-relevant vocabulary from the description.\n\
    - Avoid repeating words or phrases across bullets; keep bullets concise and ATS-friendly.";

/// Rules for skills-class sections: additive-only, evidence-tiered.
pub const SKILLS_RULES: &str = "\
    - DO NOT remove existing skills from any category, and do not duplicate a skill across categories.\n\
    - Only add a skill if it is clearly supported by the personal profile, or demanded by the job.\n\
    - A skill demanded by the job but absent from the profile may be added with (Basic) only.\n\
    - A skill evidenced in the profile but not yet listed may be added with (Intermediate) or higher.\n\
    - Format each category as \\resumeSubItem{Category}{Skill1 (Level), Skill2, Skill3}.\n\
    - Separate skills with commas only, never pipes (|).";

/// System prompt for cover-letter body drafting.
pub const COVER_LETTER_SYSTEM: &str = "You return only the raw LaTeX content \
    for the body of a cover letter. Never include natural-language \
    explanations or markdown formatting.";

/// Cover-letter body prompt template.
/// Replace: {grounding_instruction}, {output_instruction}, {fact_corpus},
///          {job_title}, {company}, {location}, {description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are a professional LaTeX cover-letter writer. Write the MAIN BODY of the cover letter only, in formal, concise, job-aligned prose grounded in the applicant's verified background.

{grounding_instruction}

--- PERSONAL PROFILE ---
{fact_corpus}

--- JOB INPUT ---
- Job Title: {job_title}
- Company: {company}
- Location: {location}
- Job Description:
{description}

--- OUTPUT RULES ---
{output_instruction}
Do NOT include a salutation (e.g. "Dear Hiring Manager") or a signature — only the core body between the two. Write 2 to 4 short paragraphs. Use keywords and skills from the job description only where they align with the applicant's actual experience.

Only return LaTeX-compatible body content. Nothing else."#;
