//! Dependency graph construction
//!
//! Combines import extraction and project resolution across all collected
//! files into a flat mapping from each file to the project files it imports.
//! The graph is a fact table, not a traversal engine: no topological sort,
//! no cycle detection, no recursive walks. Cycles and self-edges are kept
//! as data.

use super::collector::{SourceFile, SOURCE_EXTENSION};
use super::imports::ImportExtractor;
use super::resolver::ProjectResolver;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Mapping from each source file to the ordered set of project files it
/// imports. Keys and targets are paths relative to the project root. Every
/// collected file is a key, including files with no edges and files whose
/// parse failed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGraph {
    #[serde(flatten)]
    edges: BTreeMap<PathBuf, Vec<PathBuf>>,
}

impl DependencyGraph {
    /// Target files imported by `path`, in source order
    pub fn dependencies_of(&self, path: &Path) -> &[PathBuf] {
        self.edges.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over (file, targets) entries in deterministic path order
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Vec<PathBuf>)> {
        self.edges.iter()
    }

    pub fn file_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Renders a file's dependency list for inclusion in an inference
    /// request.
    pub fn describe_dependencies(&self, path: &Path) -> String {
        let targets = self.dependencies_of(path);
        if targets.is_empty() {
            format!(
                "The file {} does not import any other project files",
                path.display()
            )
        } else {
            let joined = targets
                .iter()
                .map(|t| t.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "The file {} imports the following files: {}",
                path.display(),
                joined
            )
        }
    }
}

/// Builds a [`DependencyGraph`] from the collected file set
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    verify_edges: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables existence checking of constructed edge targets. Dangling
    /// edges are reported with a warning but kept, so the data shape is
    /// identical with or without verification.
    pub fn with_edge_verification(mut self, verify_edges: bool) -> Self {
        self.verify_edges = verify_edges;
        self
    }

    /// Builds the graph. Per-file extraction failures are recovered: the
    /// failing file keeps its key with zero edges and the build continues.
    pub fn build(&self, root: &Path, files: &[SourceFile]) -> DependencyGraph {
        let resolver = ProjectResolver::new(files);
        if resolver.is_empty() {
            debug!("No project modules indexed, every import will be external");
        }
        let mut extractor = match ImportExtractor::new() {
            Ok(extractor) => extractor,
            Err(err) => {
                // Grammar failure means no file can be parsed; an all-keys,
                // zero-edge graph preserves the per-file recovery contract.
                warn!(error = %err, "Import extractor unavailable, graph will have no edges");
                let mut graph = DependencyGraph::default();
                for file in files {
                    graph.edges.insert(file.path.clone(), Vec::new());
                }
                return graph;
            }
        };

        let mut graph = DependencyGraph::default();

        for file in files {
            let targets = match extractor.extract_imports(&file.path, &file.content) {
                Ok(imports) => self.resolve_targets(root, file, imports, &resolver),
                Err(err) => {
                    debug!(path = %file.path.display(), error = %err, "Skipping edges for unparseable file");
                    Vec::new()
                }
            };
            graph.edges.insert(file.path.clone(), targets);
        }

        info!(
            files = graph.file_count(),
            modules = resolver.len(),
            edges = graph.edge_count(),
            "Dependency graph built"
        );

        graph
    }

    fn resolve_targets(
        &self,
        root: &Path,
        file: &SourceFile,
        imports: Vec<String>,
        resolver: &ProjectResolver,
    ) -> Vec<PathBuf> {
        let mut targets: Vec<PathBuf> = Vec::new();

        for import in imports {
            if !resolver.is_project_import(&import) {
                continue;
            }

            // Re-join the module name into a file path under the project
            // root. The constructed path is accepted without an existence
            // check by default; membership in the resolver's module set is
            // the only gate.
            let mut target = PathBuf::from(import.replace('.', "/"));
            target.set_extension(SOURCE_EXTENSION);

            if self.verify_edges && !root.join(&target).is_file() {
                warn!(
                    source = %file.path.display(),
                    target = %target.display(),
                    "Dangling edge: constructed dependency path does not exist"
                );
            }

            // Duplicate imports of the same module collapse to one edge
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        targets
    }
}
