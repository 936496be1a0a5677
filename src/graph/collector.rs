//! Source file collection
//!
//! Walks a project tree and collects every Python source file, reading its
//! content and deriving its module-qualified name at collection time.
//! Filesystem traversal order is not stable across platforms, so the
//! collected set is sorted by path before it is returned; downstream
//! consumers only rely on that order for display.
//!
//! Policy: an entry that cannot be read (permission error, broken symlink,
//! invalid UTF-8 content) is logged at `warn` and skipped; the scan of the
//! rest of the tree continues. Only a missing or unreadable root is fatal.

use super::error::GraphError;
use super::resolver::module_qualified_name;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extension treated as a source file
pub const SOURCE_EXTENSION: &str = "py";

/// One collected source file. Immutable after collection.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Raw text content
    pub content: String,
    /// Module-qualified name derived from the path (`pkg/util.py` -> `pkg.util`)
    pub module_name: String,
}

/// Collects all source files under `root`, recursing into subdirectories.
///
/// Files larger than `max_file_size` bytes are skipped with a warning so a
/// single vendored blob cannot dominate downstream inference requests.
pub fn collect_source_files(root: &Path, max_file_size: u64) -> Result<Vec<SourceFile>, GraphError> {
    if !root.is_dir() {
        return Err(GraphError::RootUnavailable(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_global(false)
        .git_exclude(false)
        .build()
    {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry, skipping");
                continue;
            }
        };
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }

        match entry.metadata() {
            Ok(meta) if meta.len() > max_file_size => {
                warn!(
                    path = %path.display(),
                    size = meta.len(),
                    max = max_file_size,
                    "File exceeds size limit, skipping"
                );
                continue;
            }
            Ok(_) => {}
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to stat file, skipping");
                continue;
            }
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read file, skipping");
                continue;
            }
        };

        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let module_name = module_qualified_name(&relative);

        debug!(path = %relative.display(), module = %module_name, "Collected source file");

        files.push(SourceFile {
            path: relative,
            content,
            module_name,
        });
    }

    // Sort for deterministic downstream ordering
    files.sort_by(|a, b| a.path.cmp(&b.path));

    info!(root = %root.display(), files = files.len(), "Source collection complete");

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("main.py"), "import util\n").unwrap();
        fs::write(base.join("util.py"), "x = 1\n").unwrap();
        fs::create_dir_all(base.join("pkg")).unwrap();
        fs::write(base.join("pkg/helpers.py"), "y = 2\n").unwrap();
        fs::write(base.join("README.md"), "# readme\n").unwrap();

        dir
    }

    #[test]
    fn test_collects_only_python_files() {
        let dir = create_test_tree();
        let files = collect_source_files(dir.path(), 1024 * 1024).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files
            .iter()
            .all(|f| f.path.extension().unwrap() == SOURCE_EXTENSION));
    }

    #[test]
    fn test_paths_are_relative_with_module_names() {
        let dir = create_test_tree();
        let files = collect_source_files(dir.path(), 1024 * 1024).unwrap();

        let helpers = files
            .iter()
            .find(|f| f.path == Path::new("pkg/helpers.py"))
            .unwrap();
        assert_eq!(helpers.module_name, "pkg.helpers");
        assert_eq!(helpers.content, "y = 2\n");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = collect_source_files(Path::new("/definitely/not/a/dir"), 1024);
        assert!(matches!(result, Err(GraphError::RootUnavailable(_))));
    }

    #[test]
    fn test_oversized_files_skipped() {
        let dir = create_test_tree();
        let files = collect_source_files(dir.path(), 4).unwrap();

        // every fixture file is larger than 4 bytes
        assert!(files.is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = collect_source_files(dir.path(), 1024).unwrap();
        assert!(files.is_empty());
    }
}
