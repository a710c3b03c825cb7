//! Deterministic keyword-theme analysis
//!
//! A [`ThemeCatalog`] maps theme names to lowercase keyword fragments.
//! Matching is a plain substring test against the lowercased feedback, so
//! `"integrat"` covers both "integration" and "integrate".

use std::path::Path;

use insight_core::{AnalysisMode, AnalysisResult};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const MAX_OPPORTUNITIES: usize = 3;

/// A named theme and the keyword fragments that detect it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Theme {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn matches(&self, blob: &str) -> bool {
        self.keywords.iter().any(|keyword| blob.contains(keyword.as_str()))
    }
}

fn trimmed_items(field: &'static str, items: &[String]) -> Result<Vec<String>, CatalogError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item = item.trim();
            if item.is_empty() {
                Err(CatalogError::InvalidField {
                    field,
                    reason: format!("item {} must not be blank", i),
                })
            } else {
                Ok(item.to_string())
            }
        })
        .collect()
}

/// Themes in output order plus the boilerplate used by local analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeCatalog {
    pub themes: Vec<Theme>,
    #[serde(default = "default_fallback_theme")]
    pub fallback_theme: String,
    #[serde(default = "default_prd_outline")]
    pub prd_outline: Vec<String>,
    #[serde(default = "default_experiments")]
    pub experiments: Vec<String>,
}

fn default_fallback_theme() -> String {
    "General UX Feedback".to_string()
}

fn default_prd_outline() -> Vec<String> {
    [
        "Problem statement and target persona",
        "Current user journey pain points",
        "Proposed feature changes",
        "Success metrics and rollout plan",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_experiments() -> Vec<String> {
    [
        "A/B test onboarding checklist completion",
        "Track support-ticket volume before/after release",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeCatalog {
    pub fn builtin() -> Self {
        Self {
            themes: vec![
                Theme::new(
                    "Onboarding Friction",
                    &["onboard", "setup", "signup", "start"],
                ),
                Theme::new(
                    "Reliability Issues",
                    &["crash", "bug", "error", "slow", "latency", "fail"],
                ),
                Theme::new(
                    "Pricing Confusion",
                    &["price", "pricing", "plan", "cost", "expensive"],
                ),
                Theme::new(
                    "Missing Integrations",
                    &["integrat", "slack", "zapier", "api", "export"],
                ),
            ],
            fallback_theme: default_fallback_theme(),
            prd_outline: default_prd_outline(),
            experiments: default_experiments(),
        }
    }

    /// Parse a catalog from TOML:
    ///
    /// ```toml
    /// [[themes]]
    /// name = "Onboarding Friction"
    /// keywords = ["onboard", "setup"]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let mut catalog: Self = toml::from_str(content)?;

        for theme in &mut catalog.themes {
            theme.name = theme.name.trim().to_string();
            theme.keywords = theme
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if theme.name.is_empty() || theme.keywords.is_empty() {
                return Err(CatalogError::InvalidTheme(theme.name.clone()));
            }
        }

        if catalog.themes.is_empty() {
            return Err(CatalogError::Empty);
        }

        catalog.fallback_theme = catalog.fallback_theme.trim().to_string();
        if catalog.fallback_theme.is_empty() {
            return Err(CatalogError::InvalidField {
                field: "fallback_theme",
                reason: "must not be blank".to_string(),
            });
        }

        catalog.prd_outline = trimmed_items("prd_outline", &catalog.prd_outline)?;
        catalog.experiments = trimmed_items("experiments", &catalog.experiments)?;
        if catalog.experiments.is_empty() {
            return Err(CatalogError::InvalidField {
                field: "experiments",
                reason: "must list at least one experiment".to_string(),
            });
        }

        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Matching theme names in declaration order.
    pub fn detect(&self, feedback: &[String]) -> Vec<String> {
        let blob = feedback.join(" ").to_lowercase();

        let mut matched: Vec<String> = Vec::new();
        for theme in self.themes.iter().filter(|t| t.matches(&blob)) {
            if !matched.contains(&theme.name) {
                matched.push(theme.name.clone());
            }
        }
        matched
    }
}

/// Analyze feedback with keyword matching only.
///
/// Pure: the same catalog and feedback always yield the same result.
pub fn analyze_locally(feedback: &[String], catalog: &ThemeCatalog) -> AnalysisResult {
    let mut themes = catalog.detect(feedback);
    if themes.is_empty() {
        themes.push(catalog.fallback_theme.clone());
    }

    let opportunities = themes
        .iter()
        .take(MAX_OPPORTUNITIES)
        .map(|theme| {
            format!(
                "Improve {} with clearer product guidance",
                theme.to_lowercase()
            )
        })
        .collect();

    let summary = format!(
        "Analyzed {} feedback item(s). Detected {} theme(s): {}.",
        feedback.len(),
        themes.len(),
        themes.join(", ")
    );

    AnalysisResult {
        mode: AnalysisMode::Mock,
        summary,
        themes,
        opportunities,
        prd_outline: catalog.prd_outline.clone(),
        experiments: catalog.experiments.clone(),
    }
}
