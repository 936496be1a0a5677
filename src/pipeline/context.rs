//! Pipeline context
//!
//! Owns the long-lived run state: the service client (an explicitly
//! constructed value, never a process-wide singleton), the configuration,
//! and the outputs each phase hands to the next. Phases communicate only
//! through this context; no phase mutates another phase's output.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::graph::{DependencyGraph, SourceFile};
use crate::llm::LLMClient;
use crate::output::FileFailure;

use super::config::PipelineConfig;
use super::phases::localize::Verdict;

pub struct AnalysisContext {
    /// Inference client shared by localization and repair
    pub llm_client: Arc<dyn LLMClient>,

    /// Pipeline configuration
    pub config: PipelineConfig,

    /// Analyzed project root
    pub repo_path: PathBuf,

    /// Bug description, shared by all stages
    pub bug_report: String,

    /// Collected source files (collect phase output)
    pub files: Vec<SourceFile>,

    /// Dependency graph (graph phase output, read-only afterwards)
    pub graph: Option<DependencyGraph>,

    /// Per-file classification outcome (localize phase output)
    pub verdicts: BTreeMap<PathBuf, Verdict>,

    /// Repair payload per implicated file (repair phase output)
    pub repairs: BTreeMap<PathBuf, String>,

    /// Repair-stage failures
    pub failures: Vec<FileFailure>,
}

impl AnalysisContext {
    pub fn new(
        repo_path: impl Into<PathBuf>,
        bug_report: impl Into<String>,
        llm_client: Arc<dyn LLMClient>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            llm_client,
            config,
            repo_path: repo_path.into(),
            bug_report: bug_report.into(),
            files: Vec::new(),
            graph: None,
            verdicts: BTreeMap::new(),
            repairs: BTreeMap::new(),
            failures: Vec::new(),
        }
    }

    /// Files with an affirmative verdict, in deterministic path order
    pub fn implicated_files(&self) -> Vec<PathBuf> {
        self.verdicts
            .iter()
            .filter(|(_, v)| matches!(v, Verdict::Implicated))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLLMClient;

    #[test]
    fn test_context_creation() {
        let client = Arc::new(MockLLMClient::new());
        let context = AnalysisContext::new(
            "/tmp/project",
            "the loader crashes on valid files",
            client,
            PipelineConfig::default(),
        );

        assert_eq!(context.repo_path, PathBuf::from("/tmp/project"));
        assert!(context.files.is_empty());
        assert!(context.graph.is_none());
        assert!(context.verdicts.is_empty());
    }

    #[test]
    fn test_implicated_files_filters_verdicts() {
        let client = Arc::new(MockLLMClient::new());
        let mut context =
            AnalysisContext::new("/tmp/p", "bug", client, PipelineConfig::default());

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

        assert_eq!(context.implicated_files(), vec![PathBuf::from("b.py")]);
    }
}
