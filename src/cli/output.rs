//! Output formatting for multiple formats
//!
//! Formatters for the run report: JSON and YAML for machine consumption,
//! and a human-readable layout that lists the probable buggy files before
//! the repair payloads.

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::output::RunReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for run reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_human(&self, report: &RunReport) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Repository: {}", report.repo_path);
        let _ = writeln!(out, "Files analyzed: {}", report.files_analyzed);
        let _ = writeln!(out);

        let _ = writeln!(out, "Probable buggy files:");
        if report.implicated.is_empty() {
            let _ = writeln!(out, "  (none)");
        } else {
            for path in &report.implicated {
                let _ = writeln!(out, "  {}", path);
            }
        }

        if !report.repairs.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Fixed code with explanation:");
            for (path, repair) in &report.repairs {
                let _ = writeln!(out);
                let _ = writeln!(out, "--- {} ---", path);
                let _ = writeln!(out, "{}", repair);
            }
        }

        if !report.failed.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Files that could not be processed (retry or inspect manually):");
            for failure in &report.failed {
                let _ = writeln!(
                    out,
                    "  {} ({:?} stage): {}",
                    failure.path, failure.stage, failure.error
                );
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{FileFailure, PipelineStage};
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn sample_report() -> RunReport {
        let mut repairs = BTreeMap::new();
        repairs.insert("b.py".to_string(), "patched code".to_string());

        RunReport {
            repo_path: "/tmp/project".to_string(),
            generated_at: Utc::now(),
            files_analyzed: 3,
            implicated: vec!["b.py".to_string()],
            repairs,
            failed: vec![FileFailure {
                path: "c.py".to_string(),
                stage: PipelineStage::Localize,
                error: "timeout".to_string(),
            }],
        }
    }

    #[test]
    fn test_json_format_parses_back() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["implicated"][0], "b.py");
        assert_eq!(parsed["repairs"]["b.py"], "patched code");
    }

    #[test]
    fn test_yaml_format() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format(&sample_report()).unwrap();

        assert!(output.contains("implicated"));
        assert!(output.contains("b.py"));
    }

    #[test]
    fn test_human_format_sections() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format(&sample_report()).unwrap();

        assert!(output.contains("Probable buggy files:"));
        assert!(output.contains("Fixed code with explanation:"));
        assert!(output.contains("patched code"));
        assert!(output.contains("could not be processed"));
        assert!(output.contains("c.py"));
    }

    #[test]
    fn test_human_format_empty_implicated() {
        let report = RunReport {
            repo_path: "/tmp/project".to_string(),
            generated_at: Utc::now(),
            files_analyzed: 0,
            implicated: vec![],
            repairs: BTreeMap::new(),
            failed: vec![],
        };

        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format(&report).unwrap();

        assert!(output.contains("(none)"));
        assert!(!output.contains("Fixed code"));
    }
}
