//! Flat-file catalogs — content blocks, base sections, and the fact corpus.
//!
//! All inputs are loaded read-only per run. There is no database: the
//! applicant's portfolio lives in a handful of files under the assets dir.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A reusable portfolio fragment, pre-authored in LaTeX and tagged with a
/// stable identifier (the catalog key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// LaTeX fragment injected into a `((( PROJECT_BLOCK_i )))` slot.
    /// Optional in the file format; the selector rejects entries without it
    /// before any LLM call.
    pub block: Option<String>,
    /// Prose bullets merged into the section set for rewriting.
    #[serde(default)]
    pub summary: Option<String>,
}

/// The full content-block catalog, keyed by identifier.
pub type BlockPool = BTreeMap<String, ContentBlock>;

/// Section name → LaTeX content. Values evolve base → enriched → rewritten
/// over one pipeline run; keys are fixed by the base catalog plus the
/// selected block identifiers.
pub type SectionSet = BTreeMap<String, String>;

/// The job posting the documents are personalized for. Supplied per run by
/// the front end as plain strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTarget {
    pub job_title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub description: String,
}

impl JobTarget {
    /// Location as shown in prompts — the field is optional input.
    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or("Not specified")
    }
}

pub async fn load_block_pool(path: &Path) -> Result<BlockPool, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read content-block catalog {}", path.display()))?;
    let pool: BlockPool = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed content-block catalog {}", path.display()))?;
    Ok(pool)
}

pub async fn load_base_sections(path: &Path) -> Result<SectionSet, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read base section catalog {}", path.display()))?;
    let sections: SectionSet = serde_json::from_str(&raw)
        .with_context(|| format!("Malformed base section catalog {}", path.display()))?;
    Ok(sections)
}

/// The fact corpus is consumed verbatim — it is the sole admissible source
/// of claims in rewritten sections.
pub async fn load_fact_corpus(path: &Path) -> Result<String, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read fact corpus {}", path.display()))?;
    Ok(raw.trim().to_string())
}
