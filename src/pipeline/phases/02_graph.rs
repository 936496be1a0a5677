use crate::graph::GraphBuilder;
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Builds the dependency graph over the collected files. Never fails:
/// unparseable files contribute zero edges and the build carries on.
pub struct GraphPhase;

#[async_trait]
impl WorkflowPhase for GraphPhase {
    fn name(&self) -> &'static str {
        "GraphPhase"
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let builder = GraphBuilder::new().with_edge_verification(context.config.verify_edges);
        let graph = builder.build(&context.repo_path, &context.files);

        info!(
            files = graph.file_count(),
            edges = graph.edge_count(),
            "Dependency graph phase complete"
        );

        context.graph = Some(graph);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::collect::CollectPhase;
    use crate::llm::MockLLMClient;
    use crate::pipeline::config::PipelineConfig;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_graph_built_from_collected_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.py"), "import b\n").unwrap();
        fs::write(dir.path().join("b.py"), "x = 1\n").unwrap();

        let mut context = AnalysisContext::new(
            dir.path(),
            "bug",
            Arc::new(MockLLMClient::new()),
            PipelineConfig::default(),
        );

        CollectPhase.execute(&mut context).await.unwrap();
        GraphPhase.execute(&mut context).await.unwrap();

        let graph = context.graph.as_ref().unwrap();
        assert_eq!(graph.file_count(), 2);
        assert_eq!(graph.dependencies_of(Path::new("a.py")).len(), 1);
    }
}
