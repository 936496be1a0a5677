//! Static dependency-graph core
//!
//! Collects source files, extracts their imports from the syntax tree,
//! resolves which imports point back into the project, and assembles the
//! per-file dependency mapping used as context by the pipeline.

mod builder;
mod collector;
mod error;
mod imports;
mod resolver;

pub use builder::{DependencyGraph, GraphBuilder};
pub use collector::{collect_source_files, SourceFile, SOURCE_EXTENSION};
pub use error::GraphError;
pub use imports::ImportExtractor;
pub use resolver::{module_qualified_name, ProjectResolver};
