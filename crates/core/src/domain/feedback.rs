use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;

/// Request body of `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AnalyzeRequest {
    /// Raw user feedback snippets
    pub feedback: Vec<String>,
    /// Optional product/background context
    #[serde(default)]
    pub context: Option<String>,
}

impl AnalyzeRequest {
    pub fn new(feedback: Vec<String>) -> Self {
        Self {
            feedback,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Rejects an empty feedback list or any blank item.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.feedback.is_empty() {
            return Err(CoreError::Validation(
                "feedback must contain at least one item".to_string(),
            ));
        }

        if let Some(index) = self.feedback.iter().position(|f| f.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "feedback[{}] must not be blank",
                index
            )));
        }

        Ok(())
    }

    /// Context with surrounding whitespace removed; blank context counts as absent.
    pub fn context(&self) -> Option<&str> {
        self.context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_non_empty_feedback() {
        let request = AnalyzeRequest::new(vec!["Signup is slow".to_string()]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_list() {
        let request = AnalyzeRequest::new(vec![]);
        assert!(matches!(request.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_blank_item() {
        let request = AnalyzeRequest::new(vec!["ok".to_string(), "   ".to_string()]);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("feedback[1]"));
    }

    #[test]
    fn test_context_is_optional_in_json() {
        let request: AnalyzeRequest = serde_json::from_str(r#"{"feedback": ["a"]}"#).unwrap();
        assert!(request.context.is_none());

        let request = request.with_context("  ");
        assert_eq!(request.context(), None);

        let request = request.with_context(" B2B SaaS ");
        assert_eq!(request.context(), Some("B2B SaaS"));
    }
}
