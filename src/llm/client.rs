use super::error::BackendError;
use super::types::{LLMRequest, LLMResponse};
use async_trait::async_trait;

/// The inference service boundary.
///
/// Both pipeline stages speak through this trait: the localizer sends
/// classification requests and reads the verdict token from the response,
/// the repair stage sends repair requests and keeps the response verbatim.
/// Implementations must be shareable across the worker pool.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Sends one chat completion request and returns the text response.
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError>;

    /// Backend name for logs and diagnostics
    fn name(&self) -> &str;

    /// Model identifier, if the backend has one
    fn model_info(&self) -> Option<String> {
        None
    }
}
