//! Repair synthesis phase
//!
//! Requests a patched version of every implicated file. The request carries
//! the same three context fields as classification (bug report, dependency
//! list, file content) under a repair-oriented system instruction. The
//! response is kept as raw text; separating patched code from explanation
//! is a presentation concern.
//!
//! Transient service errors are retried with exponential backoff up to the
//! configured retry count. A file whose repair ultimately fails lands in
//! the failure list; other files are unaffected.

use crate::graph::SourceFile;
use crate::llm::{BackendError, ChatMessage, LLMClient, LLMRequest};
use crate::output::{FileFailure, PipelineStage};
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::localize::call_with_timeout;

const REPAIR_SYSTEM_PROMPT: &str = "You are an expert developer tasked with fixing the bug in \
    the given code. Here is the bug description, the file content, and its dependencies. Please \
    provide the fixed code along with an explanation.";

pub(crate) fn build_repair_request(
    bug_report: &str,
    dependencies_text: String,
    file: &SourceFile,
) -> LLMRequest {
    LLMRequest::new(vec![
        ChatMessage::system(REPAIR_SYSTEM_PROMPT),
        ChatMessage::user(bug_report),
        ChatMessage::user(dependencies_text),
        ChatMessage::user(format!(
            "Here is the content of the file {}:\n\n{}",
            file.path.display(),
            file.content
        )),
    ])
}

async fn request_with_retry(
    client: &dyn LLMClient,
    request: LLMRequest,
    timeout: Duration,
    retries: usize,
    backoff: Duration,
) -> Result<String, BackendError> {
    let mut attempt = 0;
    loop {
        match call_with_timeout(client, request.clone(), timeout).await {
            Ok(response) => return Ok(response.content),
            Err(err) if err.is_transient() && attempt < retries => {
                let delay = backoff * 2u32.saturating_pow(attempt as u32);
                debug!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient repair failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

pub struct RepairPhase;

#[async_trait]
impl WorkflowPhase for RepairPhase {
    fn name(&self) -> &'static str {
        "RepairPhase"
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let graph = context
            .graph
            .as_ref()
            .ok_or_else(|| anyhow!("Repair phase requires a built dependency graph"))?;

        let implicated = context.implicated_files();
        if implicated.is_empty() {
            info!("No implicated files, skipping repair synthesis");
            return Ok(());
        }

        let timeout = context.config.request_timeout;
        let retries = context.config.repair_retries;
        let backoff = context.config.retry_backoff;

        let jobs = context
            .files
            .iter()
            .filter(|file| implicated.contains(&file.path))
            .map(|file| {
                let client = Arc::clone(&context.llm_client);
                let request = build_repair_request(
                    &context.bug_report,
                    graph.describe_dependencies(&file.path),
                    file,
                );
                let path = file.path.clone();

                async move {
                    let outcome =
                        request_with_retry(client.as_ref(), request, timeout, retries, backoff)
                            .await;
                    (path, outcome)
                }
            });
        let jobs: Vec<_> = jobs.collect();

        // Floor of one: a zero-width pool would never drain the stream
        let results: Vec<(PathBuf, Result<String, BackendError>)> = stream::iter(jobs)
            .buffer_unordered(context.config.max_concurrency.max(1))
            .collect()
            .await;

        for (path, outcome) in results {
            match outcome {
                Ok(repair) => {
                    info!(path = %path.display(), "Repair synthesized");
                    context.repairs.insert(path, repair);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Repair synthesis failed");
                    context.failures.push(FileFailure {
                        path: path.display().to_string(),
                        stage: PipelineStage::Repair,
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            repairs = context.repairs.len(),
            failed = context.failures.len(),
            "Repair synthesis complete"
        );

        Ok(())
    }
}
