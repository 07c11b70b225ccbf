//! Generation — content selection, section rewriting, cover-letter drafting,
//! and the pipeline orchestrator.

pub mod cover_letter;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod rewriter;
pub mod selector;
