use super::context::AnalysisContext;
use super::phase_trait::WorkflowPhase;
use super::phases::{
    collect::CollectPhase, graph::GraphPhase, localize::LocalizePhase, localize::Verdict,
    repair::RepairPhase,
};
use crate::output::{FileFailure, PipelineStage, RunReport};
use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info};

pub struct PipelineOrchestrator;

impl PipelineOrchestrator {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, context: &mut AnalysisContext) -> Result<RunReport> {
        let start = Instant::now();
        info!(
            repo = %context.repo_path.display(),
            "Starting analysis pipeline"
        );

        let workflow_phases: Vec<Box<dyn WorkflowPhase>> = vec![
            Box::new(CollectPhase),
            Box::new(GraphPhase),
            Box::new(LocalizePhase),
            Box::new(RepairPhase),
        ];

        for phase in workflow_phases {
            info!("Phase: {}", phase.name());
            let phase_start = Instant::now();

            phase
                .execute(context)
                .await
                .with_context(|| format!("Phase {} failed", phase.name()))?;

            debug!(
                phase = phase.name(),
                elapsed_ms = phase_start.elapsed().as_millis() as u64,
                "Phase complete"
            );
        }

        let report = assemble_report(context);

        info!(
            files = report.files_analyzed,
            implicated = report.implicated.len(),
            failed = report.failed.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Pipeline complete"
        );

        Ok(report)
    }
}

impl Default for PipelineOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

fn assemble_report(context: &AnalysisContext) -> RunReport {
    let implicated: Vec<String> = context
        .implicated_files()
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let repairs = context
        .repairs
        .iter()
        .map(|(path, repair)| (path.display().to_string(), repair.clone()))
        .collect();

    // Localization failures first, then repair failures, each in path order
    let mut failed: Vec<FileFailure> = context
        .verdicts
        .iter()
        .filter_map(|(path, verdict)| match verdict {
            Verdict::Unresolved { error } => Some(FileFailure {
                path: path.display().to_string(),
                stage: PipelineStage::Localize,
                error: error.clone(),
            }),
            _ => None,
        })
        .collect();
    failed.extend(context.failures.iter().cloned());

    RunReport {
        repo_path: context.repo_path.display().to_string(),
        generated_at: Utc::now(),
        files_analyzed: context.verdicts.len(),
        implicated,
        repairs,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLLMClient;
    use crate::pipeline::config::PipelineConfig;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_report_assembly_splits_failure_stages() {
        let mut context = AnalysisContext::new(
            "/tmp/project",
            "bug",
            Arc::new(MockLLMClient::new()),
            PipelineConfig::default(),
        );

        context
            .verdicts
            .insert(PathBuf::from("a.py"), Verdict::NotImplicated);
        context
            .verdicts
            .insert(PathBuf::from("b.py"), Verdict::Implicated);
        context.verdicts.insert(
            PathBuf::from("c.py"),
            Verdict::Unresolved {
                error: "timeout".to_string(),
            },
        );
        context
            .repairs
            .insert(PathBuf::from("b.py"), "patched".to_string());
        context.failures.push(FileFailure {
            path: "d.py".to_string(),
            stage: PipelineStage::Repair,
            error: "rate limited".to_string(),
        });

        let report = assemble_report(&context);

        assert_eq!(report.files_analyzed, 3);
        assert_eq!(report.implicated, vec!["b.py".to_string()]);
        assert_eq!(report.repairs["b.py"], "patched");
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].stage, PipelineStage::Localize);
        assert_eq!(report.failed[1].stage, PipelineStage::Repair);
    }

    #[tokio::test]
    async fn test_orchestrator_fails_on_missing_root() {
        let mut context = AnalysisContext::new(
            "/no/such/tree",
            "bug",
            Arc::new(MockLLMClient::new()),
            PipelineConfig::default(),
        );

        let result = PipelineOrchestrator::new().execute(&mut context).await;
        assert!(result.is_err());
    }
}
