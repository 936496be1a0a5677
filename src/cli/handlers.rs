//! Command handlers
//!
//! Each handler runs one subcommand end to end and returns a process exit
//! code. Fatal conditions (unreadable input tree, unwritable output) exit
//! nonzero; per-file inference failures do not, since the run still
//! produces a report.

use crate::cli::commands::{AnalyzeArgs, GraphArgs};
use crate::cli::output::OutputFormatter;
use crate::graph::{collect_source_files, GraphBuilder};
use crate::llm::GenAIClient;
use crate::pipeline::{AnalysisContext, PipelineConfig, PipelineOrchestrator, VerdictMode};
use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tracing::{error, info, warn};

/// Analyze input, with the unpacked archive tree (if any) kept alive for
/// the duration of the run
pub enum InputTree {
    Directory(std::path::PathBuf),
    Unpacked(TempDir),
}

impl InputTree {
    pub fn root(&self) -> &Path {
        match self {
            InputTree::Directory(path) => path,
            InputTree::Unpacked(dir) => dir.path(),
        }
    }
}

fn is_archive(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name.ends_with(".tar.gz") || name.ends_with(".tgz")
}

/// Resolves the analyze input: a directory is used as-is, a `.tar.gz`
/// archive is unpacked into a temporary tree.
pub fn resolve_input_tree(path: &Path) -> Result<InputTree> {
    if path.is_dir() {
        return Ok(InputTree::Directory(path.to_path_buf()));
    }

    if path.is_file() && is_archive(path) {
        let dest = TempDir::new().context("Failed to create extraction directory")?;

        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open archive {}", path.display()))?;
        let mut archive = tar::Archive::new(GzDecoder::new(file));
        archive
            .unpack(dest.path())
            .with_context(|| format!("Failed to unpack archive {}", path.display()))?;

        info!(archive = %path.display(), dest = %dest.path().display(), "Unpacked archive");

        return Ok(InputTree::Unpacked(dest));
    }

    bail!(
        "Input path is neither a directory nor a .tar.gz archive: {}",
        path.display()
    );
}

fn read_bug_report(args: &AnalyzeArgs) -> Result<String> {
    match (&args.bug, &args.bug_file) {
        (Some(text), None) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bug description from {}", path.display())),
        (None, None) => bail!("A bug description is required: pass --bug or --bug-file"),
        (Some(_), Some(_)) => unreachable!("clap rejects --bug together with --bug-file"),
    }
}

fn write_output(output: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            println!("{}", output);
            Ok(())
        }
    }
}

pub async fn handle_analyze(args: &AnalyzeArgs) -> i32 {
    match run_analyze(args).await {
        Ok(()) => 0,
        Err(err) => {
            error!("Analysis failed: {:#}", err);
            1
        }
    }
}

async fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let tree = resolve_input_tree(&args.path)?;
    let bug_report = read_bug_report(args)?;

    let config = PipelineConfig::new()
        .with_max_concurrency(args.concurrency)
        .with_request_timeout(Duration::from_secs(args.timeout))
        .with_verdict_mode(if args.lenient_verdicts {
            VerdictMode::Normalized
        } else {
            VerdictMode::Strict
        })
        .with_edge_verification(args.verify_edges);

    let client = GenAIClient::new(
        args.backend,
        args.model.clone(),
        Duration::from_secs(args.timeout),
    );

    let mut context = AnalysisContext::new(tree.root(), bug_report, Arc::new(client), config);

    let report = PipelineOrchestrator::new().execute(&mut context).await?;

    if report.has_failures() {
        warn!(
            failed = report.failed.len(),
            "Some files could not be processed; see the failed list in the report"
        );
    }

    let formatter = OutputFormatter::new(args.format.into());
    let output = formatter.format(&report)?;
    write_output(&output, args.output.as_deref())?;

    Ok(())
}

pub async fn handle_graph(args: &GraphArgs) -> i32 {
    match run_graph(args) {
        Ok(()) => 0,
        Err(err) => {
            error!("Graph build failed: {:#}", err);
            1
        }
    }
}

fn run_graph(args: &GraphArgs) -> Result<()> {
    let config = PipelineConfig::default();
    let files = collect_source_files(&args.path, config.max_file_size)?;
    let graph = GraphBuilder::new()
        .with_edge_verification(args.verify_edges)
        .build(&args.path, &files);

    let json =
        serde_json::to_string_pretty(&graph).context("Failed to serialize dependency graph")?;
    write_output(&json, args.output.as_deref())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_is_archive() {
        assert!(is_archive(Path::new("repo.tar.gz")));
        assert!(is_archive(Path::new("repo.tgz")));
        assert!(!is_archive(Path::new("repo.zip")));
        assert!(!is_archive(Path::new("repo")));
    }

    #[test]
    fn test_resolve_input_tree_directory() {
        let dir = TempDir::new().unwrap();
        let tree = resolve_input_tree(dir.path()).unwrap();
        assert_eq!(tree.root(), dir.path());
    }

    #[test]
    fn test_resolve_input_tree_rejects_other_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "hello").unwrap();

        assert!(resolve_input_tree(&file).is_err());
    }

    #[test]
    fn test_resolve_input_tree_unpacks_archive() {
        let dir = TempDir::new().unwrap();

        // Build a small .tar.gz containing one source file
        let archive_path = dir.path().join("repo.tar.gz");
        let file = fs::File::create(&archive_path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let content = b"import os\n";
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "project/main.py", &content[..])
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap();

        let tree = resolve_input_tree(&archive_path).unwrap();
        assert!(tree.root().join("project/main.py").is_file());
    }

    #[test]
    fn test_read_bug_report_from_file() {
        let dir = TempDir::new().unwrap();
        let bug_path = dir.path().join("bug.txt");
        fs::write(&bug_path, "the loader crashes").unwrap();

        let args = sample_args(None, Some(bug_path));
        assert_eq!(read_bug_report(&args).unwrap(), "the loader crashes");
    }

    #[test]
    fn test_read_bug_report_requires_source() {
        let args = sample_args(None, None);
        assert!(read_bug_report(&args).is_err());
    }

    fn sample_args(bug: Option<String>, bug_file: Option<PathBuf>) -> AnalyzeArgs {
        use crate::cli::commands::OutputFormatArg;
        AnalyzeArgs {
            path: PathBuf::from("/tmp/repo"),
            bug,
            bug_file,
            format: OutputFormatArg::Human,
            backend: genai::adapter::AdapterKind::Groq,
            model: "mixtral-8x7b-32768".to_string(),
            timeout: 60,
            concurrency: 4,
            lenient_verdicts: false,
            verify_edges: false,
            output: None,
        }
    }
}
