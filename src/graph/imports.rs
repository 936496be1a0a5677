//! Syntax-tree import extraction
//!
//! Extracts the module names a Python file imports by walking its
//! tree-sitter syntax tree. Parsing the real grammar (rather than scanning
//! text) avoids false positives from import-like strings in comments and
//! literals.
//!
//! Two forms are recognized, mirroring `ast.Import` / `ast.ImportFrom`:
//!
//! - `import a.b[.c] [as x]` captures the full dotted path `a.b.c`
//! - `from a.b import x, y` captures only the module path `a.b`
//!
//! Imports nested inside functions or classes count the same as top-level
//! ones. A file that fails to parse produces `GraphError::Parse`; the graph
//! builder recovers from that per file.

use super::error::GraphError;
use std::path::Path;
use tree_sitter::{Node, Parser};

pub struct ImportExtractor {
    parser: Parser,
}

impl ImportExtractor {
    pub fn new() -> Result<Self, GraphError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| GraphError::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Returns the imported module names in source order.
    pub fn extract_imports(&mut self, path: &Path, source: &str) -> Result<Vec<String>, GraphError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| GraphError::Parse {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(GraphError::Parse {
                path: path.to_path_buf(),
                message: "syntax error".to_string(),
            });
        }

        let mut imports = Vec::new();
        collect_imports(root, source, &mut imports);
        Ok(imports)
    }
}

fn collect_imports(node: Node, source: &str, imports: &mut Vec<String>) {
    match node.kind() {
        "import_statement" => {
            // `import a.b` and `import a.b as c` (possibly comma-separated)
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "dotted_name" => {
                        imports.push(source[child.byte_range()].to_string());
                    }
                    "aliased_import" => {
                        if let Some(name) = child.child_by_field_name("name") {
                            imports.push(source[name.byte_range()].to_string());
                        }
                    }
                    _ => {}
                }
            }
        }
        "import_from_statement" => {
            // `from a.b import x` captures only the module path; the
            // imported symbols are ignored. Relative-import dot prefixes
            // are captured verbatim and never resolve to a project module.
            if let Some(module) = node.child_by_field_name("module_name") {
                imports.push(source[module.byte_range()].to_string());
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_imports(child, source, imports);
    }
}
