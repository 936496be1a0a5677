//! bugscout - AI-powered bug localization and repair for source repositories
//!
//! This library locates the files implicated by a bug description and
//! synthesizes repairs for them. It builds a static import graph over a
//! Python project tree, then asks a Large Language Model (LLM) to classify
//! each file against the bug description with its dependency context, and
//! finally requests a fixed version of every implicated file.
//!
//! # Core Concepts
//!
//! - **Dependency Graph**: A per-file map from each source file to the
//!   project files it imports, extracted from real syntax trees
//! - **Localization**: A yes/no classification of every file against the
//!   bug description, answered by the LLM
//! - **Repair**: Free-form fixed code plus explanation, requested only for
//!   files the localization stage implicated
//!
//! # Example Usage
//!
//! ```ignore
//! use bugscout::llm::GenAIClient;
//! use bugscout::pipeline::{AnalysisContext, PipelineConfig, PipelineOrchestrator};
//! use genai::adapter::AdapterKind;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! async fn analyze() -> anyhow::Result<()> {
//!     let client = GenAIClient::new(
//!         AdapterKind::Groq,
//!         "mixtral-8x7b-32768".to_string(),
//!         Duration::from_secs(60),
//!     );
//!
//!     let mut context = AnalysisContext::new(
//!         "/path/to/repo",
//!         "The loader crashes on valid input files".to_string(),
//!         Arc::new(client),
//!         PipelineConfig::default(),
//!     );
//!
//!     let report = PipelineOrchestrator::new().execute(&mut context).await?;
//!     for path in &report.implicated {
//!         println!("implicated: {}", path);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`graph`]: Source collection, import extraction, and graph building
//! - [`llm`]: LLM client abstractions and backend implementations
//! - [`pipeline`]: Phase orchestration over a shared analysis context
//! - [`output`]: Run report schema shared by every output format

// Public modules
pub mod cli;
pub mod graph;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod util;

// Re-export key types for convenient access
pub use graph::{collect_source_files, DependencyGraph, GraphBuilder, GraphError, SourceFile};
pub use llm::{BackendError, GenAIClient, LLMClient, LLMRequest, LLMResponse};
pub use output::{FileFailure, PipelineStage, RunReport};
pub use pipeline::{
    AnalysisContext, PipelineConfig, PipelineOrchestrator, Verdict, VerdictMode, WorkflowPhase,
};
pub use util::{init_from_env, init_logging, parse_level, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
