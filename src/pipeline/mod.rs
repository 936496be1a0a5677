pub mod config;
pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;

pub use config::{PipelineConfig, VerdictMode};
pub use context::AnalysisContext;
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::WorkflowPhase;
pub use phases::localize::Verdict;
