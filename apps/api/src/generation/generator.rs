//! Pipeline Orchestrator — sequences the full resume and cover-letter runs.
//!
//! Resume flow: load pool → select blocks → fill project slots → enrich base
//! sections with the selected blocks' bullets → rewrite each section →
//! render → write → compile.
//!
//! Every step is sequential and every artifact is re-derivable, so partial
//! writes on failure are acceptable. Each run owns a fresh UUID directory
//! under the output root; there is no shared mutable state between runs.
//!
//! The rendered LaTeX and the compile report are ALWAYS returned — a failed
//! compile still hands the source back for inspection, only the PDF link is
//! withheld.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::catalog::{
    load_base_sections, load_block_pool, load_fact_corpus, JobTarget, SectionSet,
};
use crate::config::Config;
use crate::errors::AppError;
use crate::generation::cover_letter::draft_cover_letter_sections;
use crate::generation::rewriter::rewrite_section;
use crate::generation::selector::select_blocks;
use crate::llm_client::CompletionClient;
use crate::render::compiler::{compile_tex, CompileReport};
use crate::render::{fill_project_slots, render_sections};

/// Per-run metadata persisted next to the artifacts so the download endpoint
/// can name files after the company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub company: String,
    /// Artifact file stem within the run directory: "resume" or "cover_letter".
    pub artifact: String,
}

/// Everything a resume run produces, compile outcome included.
#[derive(Debug, Clone)]
pub struct ResumeArtifacts {
    pub run_id: Uuid,
    pub selected_blocks: Vec<String>,
    pub rendered_tex: String,
    pub compile: CompileReport,
    pub pdf_path: Option<PathBuf>,
}

/// Everything a cover-letter run produces.
#[derive(Debug, Clone)]
pub struct CoverLetterArtifacts {
    pub run_id: Uuid,
    pub rendered_tex: String,
    pub compile: CompileReport,
    pub pdf_path: Option<PathBuf>,
}

/// Runs the full resume pipeline for one job target.
pub async fn generate_resume(
    config: &Config,
    llm: &dyn CompletionClient,
    job: &JobTarget,
) -> Result<ResumeArtifacts, AppError> {
    // Step 1: Load the catalog and select the most relevant blocks
    let pool = load_block_pool(&config.content_blocks_path()).await?;
    info!("Loaded {} content blocks", pool.len());

    let selected = select_blocks(llm, &pool, job).await?;

    // Step 2: Inject selected blocks into the resume template
    let template = tokio::fs::read_to_string(config.resume_template_path())
        .await
        .context("Failed to read resume template")?;
    let filled = fill_project_slots(&template, &selected, &pool)?;

    let (run_id, run_dir) = create_run_dir(config).await?;
    tokio::fs::write(run_dir.join("resume_filled.tex"), &filled)
        .await
        .context("Failed to write filled template snapshot")?;

    // Step 3: Enrich base sections with the selected blocks' bullets
    let mut sections = load_base_sections(&config.base_sections_path()).await?;
    for key in &selected {
        let bullets = pool
            .get(key)
            .and_then(|b| b.summary.as_deref())
            .unwrap_or("")
            .trim()
            .to_string();
        sections.insert(key.clone(), bullets);
    }
    let enriched_json =
        serde_json::to_string_pretty(&sections).context("Failed to serialize enriched sections")?;
    tokio::fs::write(run_dir.join("sections.enriched.json"), enriched_json)
        .await
        .context("Failed to write enriched section snapshot")?;

    // Step 4: Rewrite every section against the job, one sequential call each
    let fact_corpus = load_fact_corpus(&config.fact_corpus_path()).await?;
    let mut rewritten = SectionSet::new();
    for (name, current) in &sections {
        let updated = rewrite_section(llm, name, current, job, &fact_corpus).await?;
        rewritten.insert(name.clone(), updated);
    }

    // Step 5: Final render and compile
    let rendered_tex = render_sections(&filled, &rewritten);
    let tex_path = run_dir.join("resume.tex");
    tokio::fs::write(&tex_path, &rendered_tex)
        .await
        .context("Failed to write rendered resume")?;

    let compile = compile_tex(&config.latex_bin, &tex_path, &run_dir).await;
    let pdf_path = existing_pdf(&run_dir, "resume").await;

    write_manifest(&run_dir, &job.company, "resume").await?;
    info!("Resume run {run_id} complete (compile success: {})", compile.success);

    Ok(ResumeArtifacts {
        run_id,
        selected_blocks: selected,
        rendered_tex,
        compile,
        pdf_path,
    })
}

/// Runs the cover-letter pipeline: one generation call, render, compile.
pub async fn generate_cover_letter(
    config: &Config,
    llm: &dyn CompletionClient,
    job: &JobTarget,
) -> Result<CoverLetterArtifacts, AppError> {
    let fact_corpus = load_fact_corpus(&config.fact_corpus_path()).await?;
    let sections = draft_cover_letter_sections(llm, job, &fact_corpus).await?;

    let template = tokio::fs::read_to_string(config.cover_letter_template_path())
        .await
        .context("Failed to read cover-letter template")?;
    let rendered_tex = render_sections(&template, &sections);

    let (run_id, run_dir) = create_run_dir(config).await?;
    let sections_json =
        serde_json::to_string_pretty(&sections).context("Failed to serialize letter sections")?;
    tokio::fs::write(run_dir.join("cover_letter_sections.json"), sections_json)
        .await
        .context("Failed to write letter section snapshot")?;

    let tex_path = run_dir.join("cover_letter.tex");
    tokio::fs::write(&tex_path, &rendered_tex)
        .await
        .context("Failed to write rendered cover letter")?;

    let compile = compile_tex(&config.latex_bin, &tex_path, &run_dir).await;
    let pdf_path = existing_pdf(&run_dir, "cover_letter").await;

    write_manifest(&run_dir, &job.company, "cover_letter").await?;
    info!(
        "Cover-letter run {run_id} complete (compile success: {})",
        compile.success
    );

    Ok(CoverLetterArtifacts {
        run_id,
        rendered_tex,
        compile,
        pdf_path,
    })
}

/// Reads the manifest of a previous run. `NotFound` when the run directory
/// or manifest does not exist.
pub async fn load_manifest(config: &Config, run_id: Uuid) -> Result<RunManifest, AppError> {
    let path = config.output_dir.join(run_id.to_string()).join("manifest.json");
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("Run {run_id} not found")))?;
    let manifest: RunManifest =
        serde_json::from_str(&raw).context("Malformed run manifest")?;
    Ok(manifest)
}

async fn create_run_dir(config: &Config) -> Result<(Uuid, PathBuf), AppError> {
    let run_id = Uuid::new_v4();
    let run_dir = config.output_dir.join(run_id.to_string());
    tokio::fs::create_dir_all(&run_dir)
        .await
        .context("Failed to create run directory")?;
    Ok((run_id, run_dir))
}

async fn write_manifest(run_dir: &Path, company: &str, artifact: &str) -> Result<(), AppError> {
    let manifest = RunManifest {
        company: company.to_string(),
        artifact: artifact.to_string(),
    };
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
    tokio::fs::write(run_dir.join("manifest.json"), json)
        .await
        .context("Failed to write run manifest")?;
    Ok(())
}

async fn existing_pdf(run_dir: &Path, stem: &str) -> Option<PathBuf> {
    let path = run_dir.join(format!("{stem}.pdf"));
    tokio::fs::try_exists(&path).await.unwrap_or(false).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::prompts::SELECTION_SYSTEM;
    use crate::llm_client::{CompletionClient, LlmError};
    use async_trait::async_trait;

    /// Stub that answers the selection call with a canned key list and every
    /// other call with a fixed rewritten fragment.
    struct PipelineStub;

    #[async_trait]
    impl CompletionClient for PipelineStub {
        async fn complete(&self, _prompt: &str, system: &str) -> Result<String, LlmError> {
            if system == SELECTION_SYSTEM {
                Ok(r#"["PROJECTS_B", "PROJECTS_A", "PROJECTS_D", "PROJECTS_C"]"#.to_string())
            } else {
                Ok("\\item Rewritten for the role".to_string())
            }
        }
    }

    fn write_assets(dir: &Path) {
        let blocks = serde_json::json!({
            "PROJECTS_A": {"block": "\\resumeProject{A} ((( PROJECTS_A )))", "summary": "\\item original A"},
            "PROJECTS_B": {"block": "\\resumeProject{B} ((( PROJECTS_B )))", "summary": "\\item original B"},
            "PROJECTS_C": {"block": "\\resumeProject{C} ((( PROJECTS_C )))", "summary": "\\item original C"},
            "PROJECTS_D": {"block": "\\resumeProject{D} ((( PROJECTS_D )))", "summary": "\\item original D"}
        });
        std::fs::write(
            dir.join("content_blocks.json"),
            serde_json::to_string_pretty(&blocks).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.join("base_sections.json"),
            r#"{"EXECUTIVE_SUMMARY": "\\resumeSubItem{}{Old summary}", "SKILLS": "\\resumeSubItem{Programming}{Rust}"}"#,
        )
        .unwrap();
        std::fs::write(dir.join("fact_corpus.txt"), "Verified background.").unwrap();
        std::fs::write(
            dir.join("resume_template.tex"),
            "((( EXECUTIVE_SUMMARY )))\n((( PROJECT_BLOCK_1 )))\n((( PROJECT_BLOCK_2 )))\n((( PROJECT_BLOCK_3 )))\n((( PROJECT_BLOCK_4 )))\n((( SKILLS )))",
        )
        .unwrap();
        std::fs::write(
            dir.join("cover_letter_template.tex"),
            "((( job_title )))\n((( company_info )))\n((( cover_letter_body )))",
        )
        .unwrap();
    }

    fn test_config(assets: &Path, output: &Path) -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            assets_dir: assets.to_path_buf(),
            output_dir: output.to_path_buf(),
            // `true` exits 0 without producing a PDF — compile success path
            // without depending on a TeX install.
            latex_bin: "true".to_string(),
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn job() -> JobTarget {
        JobTarget {
            job_title: "ML Engineer".to_string(),
            company: "Acme Corp".to_string(),
            location: Some("Remote".to_string()),
            description: "Machine learning and deployment.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resume_pipeline_end_to_end_with_stub_llm() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_assets(assets.path());
        let config = test_config(assets.path(), output.path());

        let artifacts = generate_resume(&config, &PipelineStub, &job()).await.unwrap();

        assert_eq!(
            artifacts.selected_blocks,
            vec!["PROJECTS_B", "PROJECTS_A", "PROJECTS_D", "PROJECTS_C"]
        );
        // No template syntax may survive the final render
        assert!(!artifacts.rendered_tex.contains("((("));
        assert!(artifacts.rendered_tex.contains("\\resumeProject{B}"));
        assert!(artifacts.rendered_tex.contains("\\item Rewritten for the role"));
        assert!(artifacts.compile.success);
        // `true` produced no PDF, so no path is offered
        assert!(artifacts.pdf_path.is_none());

        // Snapshots and manifest exist in the run directory
        let run_dir = output.path().join(artifacts.run_id.to_string());
        assert!(run_dir.join("resume_filled.tex").exists());
        assert!(run_dir.join("sections.enriched.json").exists());
        assert!(run_dir.join("resume.tex").exists());
        assert!(run_dir.join("manifest.json").exists());
    }

    #[tokio::test]
    async fn test_resume_pipeline_surfaces_compile_failure_with_rendered_tex() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_assets(assets.path());
        let mut config = test_config(assets.path(), output.path());
        config.latex_bin = "false".to_string();

        let artifacts = generate_resume(&config, &PipelineStub, &job()).await.unwrap();

        // Open-question resolution: compile failed, markup still returned
        assert!(!artifacts.compile.success);
        assert!(!artifacts.rendered_tex.is_empty());
        assert!(artifacts.pdf_path.is_none());
    }

    #[tokio::test]
    async fn test_cover_letter_pipeline_end_to_end() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_assets(assets.path());
        let config = test_config(assets.path(), output.path());

        let artifacts = generate_cover_letter(&config, &PipelineStub, &job())
            .await
            .unwrap();

        assert!(artifacts.rendered_tex.contains("ML Engineer"));
        assert!(artifacts.rendered_tex.contains("Acme Corp \\\\ Remote"));
        assert!(artifacts.rendered_tex.contains("\\item Rewritten for the role"));
        assert!(!artifacts.rendered_tex.contains("((("));
        assert!(artifacts.compile.success);
    }

    #[tokio::test]
    async fn test_manifest_roundtrip() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_assets(assets.path());
        let config = test_config(assets.path(), output.path());

        let artifacts = generate_resume(&config, &PipelineStub, &job()).await.unwrap();
        let manifest = load_manifest(&config, artifacts.run_id).await.unwrap();
        assert_eq!(manifest.company, "Acme Corp");
        assert_eq!(manifest.artifact, "resume");
    }

    #[tokio::test]
    async fn test_manifest_missing_run_is_not_found() {
        let assets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_assets(assets.path());
        let config = test_config(assets.path(), output.path());

        let err = load_manifest(&config, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
