//! Project import resolution
//!
//! Decides whether an imported module name refers to a file inside the
//! analyzed tree, as opposed to an external/library import. This is a pure
//! string-equality membership test against the module-qualified names of all
//! collected files: no fuzzy matching, no relative-import dot handling, no
//! `__init__`-style package promotion.
//!
//! Matching is byte-exact and case-sensitive on every platform, independent
//! of filesystem case semantics. Path separators are normalized to `.`
//! during qualification so the same tree yields the same names everywhere.

use super::collector::SourceFile;
use std::collections::HashSet;
use std::path::Path;

/// Derives a file's module-qualified name from its path relative to the
/// project root: extension stripped, separators replaced with `.`
/// (e.g. `pkg/util.py` -> `pkg.util`).
pub fn module_qualified_name(relative_path: &Path) -> String {
    let stem = relative_path.with_extension("");
    stem.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join(".")
}

/// Membership index over the module-qualified names of the collected files
#[derive(Debug, Clone)]
pub struct ProjectResolver {
    modules: HashSet<String>,
}

impl ProjectResolver {
    pub fn new(files: &[SourceFile]) -> Self {
        let modules = files.iter().map(|f| f.module_name.clone()).collect();
        Self { modules }
    }

    /// True iff the import name exactly equals some collected file's
    /// module-qualified name.
    pub fn is_project_import(&self, import_name: &str) -> bool {
        self.modules.contains(import_name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
