use std::time::Duration;

use thiserror::Error;

/// OpenRouter client error types
#[derive(Debug, Error)]
pub enum OpenRouterError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("OpenRouter request timed out after {timeout:?}")]
    Timeout { timeout: Duration, elapsed: Duration },

    #[error("OpenRouter request failed before response: {0}")]
    Transport(String),

    #[error("OpenRouter returned HTTP {status_code}: {message}")]
    Api { status_code: u16, message: String },

    #[error("OpenRouter response body is not valid JSON: {0}")]
    InvalidBody(String),
}

impl OpenRouterError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Result type alias for OpenRouter operations
pub type OpenRouterResult<T> = Result<T, OpenRouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_includes_bound() {
        let err = OpenRouterError::Timeout {
            timeout: Duration::from_secs(20),
            elapsed: Duration::from_millis(20_004),
        };
        assert_eq!(err.to_string(), "OpenRouter request timed out after 20s");
    }

    #[test]
    fn test_status_code_only_for_api_errors() {
        let err = OpenRouterError::Api {
            status_code: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(err.status_code(), Some(429));
        assert_eq!(OpenRouterError::Transport("refused".into()).status_code(), None);
    }
}
