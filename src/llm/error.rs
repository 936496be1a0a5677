//! Error types for the inference service boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur while talking to an inference backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BackendError {
    /// API request failed with the given message
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// Authentication failed or credentials are invalid
    AuthenticationError { message: String },

    /// Request timed out after the specified duration (in seconds)
    TimeoutError { seconds: u64 },

    /// Rate limit exceeded, retry after the specified duration (in seconds)
    RateLimitError { retry_after: Option<u64> },

    /// Invalid or malformed response from the service
    InvalidResponse {
        message: String,
        raw_response: Option<String>,
    },

    /// Configuration error (missing API keys, invalid settings, etc.)
    ConfigurationError { message: String },

    /// Network-related error
    NetworkError { message: String },

    /// Generic error for other cases
    Other { message: String },
}

impl BackendError {
    /// Whether a retry has a reasonable chance of succeeding.
    ///
    /// Server-side and transport failures are transient; authentication,
    /// configuration, and malformed-response errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::TimeoutError { .. }
            | BackendError::RateLimitError { .. }
            | BackendError::NetworkError { .. } => true,
            BackendError::ApiError { status_code, .. } => {
                matches!(status_code, Some(code) if *code >= 500) || status_code.is_none()
            }
            _ => false,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::ApiError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "API error ({}): {}", code, message)
                } else {
                    write!(f, "API error: {}", message)
                }
            }
            BackendError::AuthenticationError { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            BackendError::TimeoutError { seconds } => {
                write!(f, "Request timed out after {} seconds", seconds)
            }
            BackendError::RateLimitError { retry_after } => {
                if let Some(seconds) = retry_after {
                    write!(f, "Rate limit exceeded, retry after {} seconds", seconds)
                } else {
                    write!(f, "Rate limit exceeded")
                }
            }
            BackendError::InvalidResponse { message, .. } => {
                write!(f, "Invalid response from service: {}", message)
            }
            BackendError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            BackendError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            BackendError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_code() {
        let err = BackendError::ApiError {
            message: "boom".to_string(),
            status_code: Some(502),
        };
        assert_eq!(err.to_string(), "API error (502): boom");
    }

    #[test]
    fn test_transient_classification() {
        assert!(BackendError::TimeoutError { seconds: 30 }.is_transient());
        assert!(BackendError::RateLimitError { retry_after: None }.is_transient());
        assert!(BackendError::NetworkError {
            message: "reset".to_string()
        }
        .is_transient());
        assert!(BackendError::ApiError {
            message: "unavailable".to_string(),
            status_code: Some(503),
        }
        .is_transient());

        assert!(!BackendError::AuthenticationError {
            message: "bad key".to_string()
        }
        .is_transient());
        assert!(!BackendError::ApiError {
            message: "bad request".to_string(),
            status_code: Some(400),
        }
        .is_transient());
        assert!(!BackendError::InvalidResponse {
            message: "garbage".to_string(),
            raw_response: None,
        }
        .is_transient());
    }
}
