use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Directory holding the content-block catalog, base sections, fact
    /// corpus, and LaTeX templates.
    pub assets_dir: PathBuf,
    /// Root under which each run gets its own UUID-named directory.
    pub output_dir: PathBuf,
    /// LaTeX compiler binary. Overridable so tests can substitute a stub.
    pub latex_bin: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            assets_dir: PathBuf::from(
                std::env::var("ASSETS_DIR").unwrap_or_else(|_| "assets".to_string()),
            ),
            output_dir: PathBuf::from(
                std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "output".to_string()),
            ),
            latex_bin: std::env::var("LATEX_BIN").unwrap_or_else(|_| "pdflatex".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn content_blocks_path(&self) -> PathBuf {
        self.assets_dir.join("content_blocks.json")
    }

    pub fn base_sections_path(&self) -> PathBuf {
        self.assets_dir.join("base_sections.json")
    }

    pub fn fact_corpus_path(&self) -> PathBuf {
        self.assets_dir.join("fact_corpus.txt")
    }

    pub fn resume_template_path(&self) -> PathBuf {
        self.assets_dir.join("resume_template.tex")
    }

    pub fn cover_letter_template_path(&self) -> PathBuf {
        self.assets_dir.join("cover_letter_template.tex")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
