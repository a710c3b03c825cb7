//! Feedback analysis for Insight2Spec
//!
//! # Architecture
//!
//! - **Extractor**: pulls assistant text out of a chat-completion payload
//! - **Validator**: turns that text into a [`StructuredAnalysis`] or a typed failure
//! - **Heuristic**: deterministic keyword-theme analysis over a [`ThemeCatalog`]
//! - **Dispatcher**: picks local or delegated analysis and classifies failures
//!
//! [`StructuredAnalysis`]: insight_core::StructuredAnalysis

pub mod dispatcher;
pub mod error;
pub mod extractor;
pub mod heuristic;
pub mod prompts;
pub mod provider;
pub mod validator;

pub use dispatcher::Dispatcher;
pub use error::{AnalysisError, CatalogError, ParseError};
pub use extractor::extract_assistant_text;
pub use heuristic::{analyze_locally, Theme, ThemeCatalog};
pub use provider::{CompletionProvider, OpenRouterFactory, ProviderFactory};
pub use validator::validate_analysis;
