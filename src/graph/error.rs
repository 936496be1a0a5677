use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the dependency graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// Syntax tree construction failed for a file. Recovered per file by
    /// the graph builder; the file contributes no edges.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The project root is missing or not a directory. The only fatal
    /// condition: nothing can be analyzed without an input tree.
    #[error("project root is not a readable directory: {}", .0.display())]
    RootUnavailable(PathBuf),

    /// The tree-sitter grammar could not be loaded
    #[error("failed to load parser grammar: {0}")]
    Grammar(String),
}
