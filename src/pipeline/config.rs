use std::time::Duration;

/// How a classification response is mapped to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerdictMode {
    /// The trimmed response must equal the affirmative token exactly.
    /// Affirmative language embedded in a longer explanation counts as
    /// negative.
    #[default]
    Strict,
    /// Case-insensitive match after stripping surrounding whitespace and
    /// trailing punctuation. Opt-in only.
    Normalized,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Cap on concurrent outbound inference requests
    pub max_concurrency: usize,
    /// Per-call timeout for inference requests
    pub request_timeout: Duration,
    /// Retries after the first failed repair attempt
    pub repair_retries: usize,
    /// Base delay for exponential retry backoff
    pub retry_backoff: Duration,
    /// Verdict interpretation policy
    pub verdict_mode: VerdictMode,
    /// Check constructed dependency-edge targets for existence
    pub verify_edges: bool,
    /// Files larger than this are skipped at collection time
    pub max_file_size: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 4,
            request_timeout: Duration::from_secs(60),
            repair_retries: 2,
            retry_backoff: Duration::from_millis(250),
            verdict_mode: VerdictMode::Strict,
            verify_edges: false,
            max_file_size: 1024 * 1024,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_repair_retries(mut self, retries: usize) -> Self {
        self.repair_retries = retries;
        self
    }

    pub fn with_verdict_mode(mut self, mode: VerdictMode) -> Self {
        self.verdict_mode = mode;
        self
    }

    pub fn with_edge_verification(mut self, verify_edges: bool) -> Self {
        self.verify_edges = verify_edges;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.repair_retries, 2);
        assert_eq!(config.verdict_mode, VerdictMode::Strict);
        assert!(!config.verify_edges);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PipelineConfig::new()
            .with_max_concurrency(8)
            .with_request_timeout(Duration::from_secs(120))
            .with_repair_retries(5)
            .with_verdict_mode(VerdictMode::Normalized)
            .with_edge_verification(true)
            .with_max_file_size(2 * 1024 * 1024);

        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.repair_retries, 5);
        assert_eq!(config.verdict_mode, VerdictMode::Normalized);
        assert!(config.verify_edges);
        assert_eq!(config.max_file_size, 2 * 1024 * 1024);
    }

    #[test]
    fn test_concurrency_floor_is_one() {
        let config = PipelineConfig::new().with_max_concurrency(0);
        assert_eq!(config.max_concurrency, 1);
    }
}
