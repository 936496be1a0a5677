use crate::graph::collect_source_files;
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

/// Walks the project tree and collects the source file set. The only phase
/// that can fail the whole run: a missing or unreadable root leaves nothing
/// to analyze.
pub struct CollectPhase;

#[async_trait]
impl WorkflowPhase for CollectPhase {
    fn name(&self) -> &'static str {
        "CollectPhase"
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let files = collect_source_files(&context.repo_path, context.config.max_file_size)
            .with_context(|| {
                format!(
                    "Failed to collect source files from {}",
                    context.repo_path.display()
                )
            })?;

        info!(
            repo = %context.repo_path.display(),
            files = files.len(),
            "Collected source files"
        );

        context.files = files;
        Ok(())
    }
}
