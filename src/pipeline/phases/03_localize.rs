//! Bug localization phase
//!
//! Asks the inference service, file by file, whether the reported bug can
//! live in that file. Each request carries the bug report, the file's
//! rendered dependency list, and the full file content. Calls fan out
//! across a bounded worker pool; the dependency graph is read-only shared
//! context and each worker owns its own file data.

use crate::graph::SourceFile;
use crate::llm::{BackendError, ChatMessage, LLMClient, LLMRequest, LLMResponse};
use crate::pipeline::config::VerdictMode;
use crate::pipeline::context::AnalysisContext;
use crate::pipeline::phase_trait::WorkflowPhase;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The exact token an affirmative classification must equal
pub const AFFIRMATIVE_TOKEN: &str = "Yes";

const CLASSIFY_SYSTEM_PROMPT: &str = "You are the developer and you have to fix the bug in code. \
    But before that, you are given the bug description, the file content, and its dependencies. \
    Please analyze and find out if the bug, that is related to the bug description, can be in \
    this file. Respond with only a `Yes` if the bug (given in the bug description) is there in \
    the file and the file requires a fix, otherwise respond with only a `No`.";

/// Per-file classification outcome. `Unresolved` means the service call
/// failed; it is never folded into `NotImplicated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    Implicated,
    NotImplicated,
    Unresolved { error: String },
}

/// Maps a classification response to a verdict.
///
/// Strict mode requires the trimmed response to equal [`AFFIRMATIVE_TOKEN`]
/// exactly; a response that merely contains the token inside an explanation
/// is negative. Normalized mode additionally forgives case and trailing
/// punctuation, and must be opted into explicitly.
pub fn interpret_verdict(mode: VerdictMode, response: &str) -> Verdict {
    let trimmed = response.trim();
    let affirmative = match mode {
        VerdictMode::Strict => trimmed == AFFIRMATIVE_TOKEN,
        VerdictMode::Normalized => {
            let stripped = trimmed.trim_end_matches(['.', '!']).trim();
            stripped.eq_ignore_ascii_case(AFFIRMATIVE_TOKEN)
        }
    };

    if affirmative {
        Verdict::Implicated
    } else {
        Verdict::NotImplicated
    }
}

pub(crate) fn build_classification_request(
    bug_report: &str,
    dependencies_text: String,
    file: &SourceFile,
) -> LLMRequest {
    LLMRequest::new(vec![
        ChatMessage::system(CLASSIFY_SYSTEM_PROMPT),
        ChatMessage::user(bug_report),
        ChatMessage::user(dependencies_text),
        ChatMessage::user(format!(
            "Here is the content of the file {}:\n\n{}",
            file.path.display(),
            file.content
        )),
    ])
}

pub(crate) async fn call_with_timeout(
    client: &dyn LLMClient,
    request: LLMRequest,
    timeout: Duration,
) -> Result<LLMResponse, BackendError> {
    match tokio::time::timeout(timeout, client.chat(request)).await {
        Ok(result) => result,
        Err(_) => Err(BackendError::TimeoutError {
            seconds: timeout.as_secs(),
        }),
    }
}

pub struct LocalizePhase;

#[async_trait]
impl WorkflowPhase for LocalizePhase {
    fn name(&self) -> &'static str {
        "LocalizePhase"
    }

    async fn execute(&self, context: &mut AnalysisContext) -> Result<()> {
        let graph = context
            .graph
            .as_ref()
            .ok_or_else(|| anyhow!("Localize phase requires a built dependency graph"))?;

        let mode = context.config.verdict_mode;
        let timeout = context.config.request_timeout;

        let jobs = context.files.iter().map(|file| {
            let client = Arc::clone(&context.llm_client);
            let request = build_classification_request(
                &context.bug_report,
                graph.describe_dependencies(&file.path),
                file,
            );
            let path = file.path.clone();

            async move {
                let verdict = match call_with_timeout(client.as_ref(), request, timeout).await {
                    Ok(response) => interpret_verdict(mode, &response.content),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "Classification call failed");
                        Verdict::Unresolved {
                            error: err.to_string(),
                        }
                    }
                };
                (path, verdict)
            }
        });
        let jobs: Vec<_> = jobs.collect();

        // Floor of one: a zero-width pool would never drain the stream
        let results: Vec<(PathBuf, Verdict)> = stream::iter(jobs)
            .buffer_unordered(context.config.max_concurrency.max(1))
            .collect()
            .await;

        for (path, verdict) in results {
            match &verdict {
                Verdict::Implicated => info!(path = %path.display(), "File implicated"),
                Verdict::NotImplicated => debug!(path = %path.display(), "File not implicated"),
                Verdict::Unresolved { error } => {
                    debug!(path = %path.display(), error = %error, "File unresolved")
                }
            }
            context.verdicts.insert(path, verdict);
        }

        info!(
            implicated = context.implicated_files().len(),
            total = context.verdicts.len(),
            "Localization complete"
        );

        Ok(())
    }
}
