use std::path::PathBuf;
use std::time::Duration;

use openrouter::OpenRouterError;
use thiserror::Error;

/// Why a completion payload could not be turned into a structured analysis
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("OpenRouter payload missing non-empty 'choices'")]
    MissingChoices,

    #[error("No assistant text content found in OpenRouter payload")]
    NoTextContent,

    #[error("Assistant output is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Assistant output must be a JSON object")]
    NotAnObject,

    #[error("Invalid '{field}' in assistant output: {reason}")]
    FieldViolation { field: &'static str, reason: String },

    #[error("OpenRouter response body is not valid JSON: {0}")]
    InvalidBody(String),
}

impl ParseError {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::FieldViolation {
            field,
            reason: reason.into(),
        }
    }
}

/// Caller-visible failure of a delegated analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Config(String),

    #[error("OpenRouter request timed out after {timeout:?}")]
    Timeout { timeout: Duration, elapsed: Duration },

    #[error("{message}")]
    Request {
        message: String,
        status_code: Option<u16>,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AnalysisError {
    /// Stable machine-checkable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "openrouter_config_error",
            Self::Timeout { .. } => "openrouter_timeout",
            Self::Request { .. } => "openrouter_request_error",
            Self::Parse(_) => "openrouter_parse_error",
        }
    }
}

impl From<OpenRouterError> for AnalysisError {
    fn from(err: OpenRouterError) -> Self {
        let status_code = err.status_code();
        match err {
            OpenRouterError::Config(message) => Self::Config(message),
            OpenRouterError::Timeout { timeout, elapsed } => Self::Timeout { timeout, elapsed },
            OpenRouterError::InvalidBody(detail) => Self::Parse(ParseError::InvalidBody(detail)),
            other @ (OpenRouterError::Transport(_) | OpenRouterError::Api { .. }) => {
                Self::Request {
                    message: other.to_string(),
                    status_code,
                }
            }
        }
    }
}

/// Failure loading a theme catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read theme catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid theme catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Theme catalog must declare at least one theme")]
    Empty,

    #[error("Theme '{0}' must have a name and at least one keyword")]
    InvalidTheme(String),

    #[error("Theme catalog field '{field}' {reason}")]
    InvalidField { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            AnalysisError::Config("x".into()).code(),
            "openrouter_config_error"
        );
        assert_eq!(
            AnalysisError::Timeout {
                timeout: Duration::from_secs(1),
                elapsed: Duration::from_secs(1),
            }
            .code(),
            "openrouter_timeout"
        );
        assert_eq!(
            AnalysisError::Request {
                message: "x".into(),
                status_code: None,
            }
            .code(),
            "openrouter_request_error"
        );
        assert_eq!(
            AnalysisError::from(ParseError::NotAnObject).code(),
            "openrouter_parse_error"
        );
    }

    #[test]
    fn test_client_errors_map_to_classifications() {
        let err = AnalysisError::from(OpenRouterError::Config("OPENROUTER_API_KEY is required".into()));
        assert!(matches!(err, AnalysisError::Config(_)));
        assert_eq!(err.to_string(), "OPENROUTER_API_KEY is required");

        let err = AnalysisError::from(OpenRouterError::Api {
            status_code: 500,
            message: "boom".into(),
        });
        match err {
            AnalysisError::Request {
                message,
                status_code,
            } => {
                assert_eq!(status_code, Some(500));
                assert_eq!(message, "OpenRouter returned HTTP 500: boom");
            }
            other => panic!("expected Request, got {:?}", other),
        }

        let err = AnalysisError::from(OpenRouterError::Transport("connection refused".into()));
        assert!(matches!(
            err,
            AnalysisError::Request {
                status_code: None,
                ..
            }
        ));

        let err = AnalysisError::from(OpenRouterError::InvalidBody("eof".into()));
        assert!(matches!(
            err,
            AnalysisError::Parse(ParseError::InvalidBody(_))
        ));
    }
}
