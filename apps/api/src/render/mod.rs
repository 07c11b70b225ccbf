//! Rendering — template slot filling and final section substitution.
//!
//! Templates carry two placeholder families:
//! - `((( PROJECT_BLOCK_i )))` for i in 1..=4, filled with selected content
//!   blocks' LaTeX fragments;
//! - `((( SECTION_KEY )))` named variables, filled with (rewritten) section
//!   content at final render.
//!
//! Substitution is literal string replacement — the template source is never
//! mutated, and no template syntax may survive into the output.

pub mod compiler;

use crate::catalog::{BlockPool, SectionSet};
use crate::errors::AppError;

/// Fixed number of project slots in the resume template.
pub const MAX_PROJECT_SLOTS: usize = 4;

fn slot_placeholder(slot: usize) -> String {
    format!("((( PROJECT_BLOCK_{slot} )))")
}

/// Replaces each `((( PROJECT_BLOCK_i )))` placeholder with the trimmed LaTeX
/// fragment of the i-th selected block. Slots beyond the selection, up to
/// `MAX_PROJECT_SLOTS`, are blanked so unused placeholders never leak into
/// the output.
pub fn fill_project_slots(
    template: &str,
    selected: &[String],
    pool: &BlockPool,
) -> Result<String, AppError> {
    let mut filled = template.to_string();

    for (i, key) in selected.iter().enumerate() {
        let entry = pool
            .get(key)
            .ok_or_else(|| AppError::MissingBlock(key.clone()))?;
        let fragment = entry.block.as_deref().ok_or_else(|| {
            AppError::MissingField(format!("content block '{key}' has no markup fragment"))
        })?;
        filled = filled.replace(&slot_placeholder(i + 1), fragment.trim());
    }

    for slot in selected.len()..MAX_PROJECT_SLOTS {
        filled = filled.replace(&slot_placeholder(slot + 1), "");
    }

    Ok(filled)
}

/// Final render: substitutes every `((( KEY )))` named variable with the
/// trimmed section content. Keys absent from the template are no-ops.
pub fn render_sections(template: &str, sections: &SectionSet) -> String {
    let mut rendered = template.to_string();
    for (key, content) in sections {
        rendered = rendered.replace(&format!("((( {key} )))"), content.trim());
    }
    rendered
}
