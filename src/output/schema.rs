//! Run report schema
//!
//! Final output of one pipeline run: the implicated files, their repair
//! payloads, and the files whose inference calls failed and need manual
//! attention or a retry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pipeline stage a failure occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Localize,
    Repair,
}

/// A per-file failure. Distinct from a negative verdict: the service call
/// errored out, so nothing is known about the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: String,
    pub stage: PipelineStage,
    pub error: String,
}

/// Report produced by one (project tree, bug report) run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Analyzed project root
    pub repo_path: String,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Number of source files that went through classification
    pub files_analyzed: usize,
    /// Files the classifier marked as containing the bug
    pub implicated: Vec<String>,
    /// Repair payload (patched code plus explanation, unparsed) per
    /// implicated file. A missing key means no repair was produced.
    pub repairs: BTreeMap<String, String>,
    /// Files whose classification or repair call failed
    pub failed: Vec<FileFailure>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
