//! LaTeX compile collaborator — shells out to `pdflatex`.
//!
//! Compile failure is a REPORT, not an error: the pipeline always returns
//! the rendered source alongside the captured logs, and the front end shows
//! them to the user. Only the binary invocation itself lives here.

use std::path::Path;

use serde::Serialize;
use tokio::process::Command;
use tracing::{info, warn};

/// Outcome of one compiler invocation, logs included. Serialized into API
/// responses so the front end can show the raw diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct CompileReport {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the LaTeX compiler on `tex_path`, writing artifacts into
/// `output_dir`. Never fails: a missing binary or non-zero exit becomes a
/// failed report with whatever output was captured.
pub async fn compile_tex(latex_bin: &str, tex_path: &Path, output_dir: &Path) -> CompileReport {
    let result = Command::new(latex_bin)
        .arg("-interaction=nonstopmode")
        .arg(format!("-output-directory={}", output_dir.display()))
        .arg(tex_path)
        .output()
        .await;

    match result {
        Ok(output) => {
            let report = CompileReport {
                success: output.status.success(),
                exit_code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            };
            if report.success {
                info!("LaTeX compile succeeded for {}", tex_path.display());
            } else {
                warn!(
                    "LaTeX compile failed for {} (exit code {:?})",
                    tex_path.display(),
                    report.exit_code
                );
            }
            report
        }
        Err(e) => {
            warn!("Failed to launch LaTeX compiler '{latex_bin}': {e}");
            CompileReport {
                success: false,
                exit_code: None,
                stdout: String::new(),
                stderr: format!("Failed to launch '{latex_bin}': {e}"),
            }
        }
    }
}
