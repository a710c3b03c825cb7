use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;

/// Which analyzer produced a result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, Hash)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Deterministic local keyword heuristic
    #[default]
    Mock,
    /// Delegated to an OpenRouter chat completion
    #[serde(rename = "openrouter")]
    OpenRouter,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::OpenRouter => "openrouter",
        }
    }

    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Some(Self::Mock),
            "openrouter" => Some(Self::OpenRouter),
            _ => None,
        }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::OpenRouter)
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownMode(s.to_string()))
    }
}

/// Validated analysis produced by a model.
///
/// Only constructed by the analyzer's validator, so every list except
/// `prd_outline` is non-empty and every string is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    pub summary: String,
    pub themes: Vec<String>,
    pub opportunities: Vec<String>,
    pub experiments: Vec<String>,
    pub prd_outline: Vec<String>,
}

impl StructuredAnalysis {
    pub fn into_result(self, mode: AnalysisMode) -> AnalysisResult {
        AnalysisResult {
            mode,
            summary: self.summary,
            themes: self.themes,
            opportunities: self.opportunities,
            prd_outline: self.prd_outline,
            experiments: self.experiments,
        }
    }
}

/// Response body of `POST /analyze`, identical in both modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "typescript", derive(ts_rs::TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct AnalysisResult {
    pub mode: AnalysisMode,
    pub summary: String,
    pub themes: Vec<String>,
    pub opportunities: Vec<String>,
    pub prd_outline: Vec<String>,
    pub experiments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&AnalysisMode::Mock).unwrap(),
            "\"mock\""
        );
        assert_eq!(
            serde_json::to_string(&AnalysisMode::OpenRouter).unwrap(),
            "\"openrouter\""
        );
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(AnalysisMode::parse("mock"), Some(AnalysisMode::Mock));
        assert_eq!(
            AnalysisMode::parse(" OpenRouter "),
            Some(AnalysisMode::OpenRouter)
        );
        assert_eq!(AnalysisMode::parse("remote"), None);
        assert!(matches!(
            "remote".parse::<AnalysisMode>(),
            Err(CoreError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_into_result_keeps_field_values() {
        let analysis = StructuredAnalysis {
            summary: "s".to_string(),
            themes: vec!["t".to_string()],
            opportunities: vec!["o".to_string()],
            experiments: vec!["e".to_string()],
            prd_outline: vec![],
        };

        let result = analysis.into_result(AnalysisMode::OpenRouter);
        assert_eq!(result.mode, AnalysisMode::OpenRouter);
        assert_eq!(result.summary, "s");
        assert_eq!(result.themes, vec!["t"]);
        assert_eq!(result.experiments, vec!["e"]);
        assert!(result.prd_outline.is_empty());
    }
}
