use std::sync::Arc;
use std::time::Instant;

use insight_core::{AnalysisMode, AnalysisResult, AnalyzeRequest};
use openrouter::ChatCompletionRequest;
use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::extractor::extract_assistant_text;
use crate::heuristic::{analyze_locally, ThemeCatalog};
use crate::prompts::{AnalysisPrompts, DEFAULT_TEMPERATURE};
use crate::provider::ProviderFactory;
use crate::validator::validate_analysis;

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Routes each request to local or delegated analysis.
///
/// Holds only immutable configuration; every call is independent.
#[derive(Clone)]
pub struct Dispatcher {
    mode: AnalysisMode,
    model: String,
    temperature: f32,
    catalog: Arc<ThemeCatalog>,
    provider: Arc<dyn ProviderFactory>,
}

impl Dispatcher {
    pub fn new(mode: AnalysisMode, provider: Arc<dyn ProviderFactory>) -> Self {
        Self {
            mode,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            catalog: Arc::new(ThemeCatalog::builtin()),
            provider,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_catalog(mut self, catalog: ThemeCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Analyze an already-validated request.
    ///
    /// Local analysis never fails; delegated failures carry one of four
    /// classifications (see [`AnalysisError::code`]).
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AnalysisError> {
        match self.mode {
            AnalysisMode::Mock => {
                debug!(items = request.feedback.len(), "Running local heuristic analysis");
                Ok(analyze_locally(&request.feedback, &self.catalog))
            }
            AnalysisMode::OpenRouter => self.analyze_delegated(request).await,
        }
    }

    async fn analyze_delegated(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let provider = self.provider.connect()?;

        let completion = ChatCompletionRequest::new(
            &self.model,
            AnalysisPrompts::system(),
            AnalysisPrompts::user(request),
        )
        .with_temperature(self.temperature);

        info!(
            model = %self.model,
            items = request.feedback.len(),
            "Delegating analysis to OpenRouter"
        );

        let started = Instant::now();
        let payload = provider.complete(&completion).await?;

        let analysis = extract_assistant_text(&payload)
            .and_then(|text| validate_analysis(&text))
            .map_err(|e| {
                warn!(error = %e, "OpenRouter output failed validation");
                AnalysisError::Parse(e)
            })?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            themes = analysis.themes.len(),
            "Delegated analysis completed"
        );

        Ok(analysis.into_result(AnalysisMode::OpenRouter))
    }
}
