// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction that pins every generated claim to the fact corpus.
/// Shared by the section rewriter and the cover-letter drafter.
pub const FACT_GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: The personal profile below is the ONLY admissible source of \
    claims. Use only the achievements, skills, projects, and experiences it \
    contains. Do NOT infer, interpolate, or invent anything that is not \
    explicitly supported by it. If the profile does not support a claim, \
    omit the claim entirely.";

/// Output-shape instruction shared by every LaTeX-producing call.
/// The escape set matches `sanitize::escape_reserved`.
pub const LATEX_OUTPUT_INSTRUCTION: &str = "\
    Output raw LaTeX only. Do NOT escape LaTeX commands such as \\item or \
    \\resumeSubItem. DO escape special characters (&, %, $, #, _, {, }, ~, \
    ^, \\) inside literal text content. NEVER include natural-language \
    preamble such as 'Certainly' or 'Here is your section'. NEVER wrap the \
    output in markdown code fences.";
