//! Content Selector — asks the LLM to rank the catalog against a job posting
//! and returns exactly four content-block identifiers, ordered by claimed
//! relevance.
//!
//! The model call is inherently non-deterministic; this component only
//! guarantees SHAPE — four unique identifiers that resolve in the pool — and
//! fails fast rather than returning a malformed selection.

use std::collections::HashSet;

use tracing::info;

use crate::catalog::{BlockPool, JobTarget};
use crate::errors::AppError;
use crate::generation::prompts::{SELECTION_PROMPT_TEMPLATE, SELECTION_SYSTEM};
use crate::llm_client::CompletionClient;
use crate::sanitize::strip_fences;

/// Fixed size of every selection result.
pub const SELECTION_COUNT: usize = 4;

/// Selects the `SELECTION_COUNT` most relevant content blocks for `job`.
///
/// Preconditions are checked before the LLM call: every pool entry must
/// carry a markup fragment (`MissingField` otherwise). One attempt, no
/// retry — a malformed response surfaces as `UnparsableSelection` with the
/// raw text attached, an unknown identifier as `MissingBlock`.
pub async fn select_blocks(
    llm: &dyn CompletionClient,
    pool: &BlockPool,
    job: &JobTarget,
) -> Result<Vec<String>, AppError> {
    for (key, entry) in pool {
        if entry.block.is_none() {
            return Err(AppError::MissingField(format!(
                "content block '{key}' has no markup fragment"
            )));
        }
    }

    let labeled_blocks = pool
        .iter()
        .map(|(key, entry)| format!("[{key}]\n{}", entry.block.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = SELECTION_PROMPT_TEMPLATE
        .replace("{job_title}", &job.job_title)
        .replace("{company}", &job.company)
        .replace("{location}", job.location_or_default())
        .replace("{description}", &job.description)
        .replace("{blocks}", &labeled_blocks);

    let raw = llm
        .complete(&prompt, SELECTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Selection call failed: {e}")))?;

    let cleaned = strip_fences(&raw);

    let keys: Vec<String> = serde_json::from_str(&cleaned)
        .map_err(|_| AppError::UnparsableSelection { raw: raw.clone() })?;

    if keys.len() != SELECTION_COUNT {
        return Err(AppError::UnparsableSelection { raw });
    }

    let unique: HashSet<&String> = keys.iter().collect();
    if unique.len() != SELECTION_COUNT {
        return Err(AppError::UnparsableSelection { raw });
    }

    for key in &keys {
        if !pool.contains_key(key) {
            return Err(AppError::MissingBlock(key.clone()));
        }
    }

    info!("Selected blocks: {keys:?}");
    Ok(keys)
}
