//! Seam between the dispatcher and the completion endpoint
//!
//! The dispatcher asks a [`ProviderFactory`] for a fresh client on every
//! delegated request, then issues exactly one completion through it.

use async_trait::async_trait;
use openrouter::{ChatCompletionRequest, ClientConfig, OpenRouterClient};
use serde_json::Value;

use crate::error::AnalysisError;

/// One chat completion returning the raw provider payload
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Value, AnalysisError>;
}

/// Builds a [`CompletionProvider`] from already-resolved configuration
pub trait ProviderFactory: Send + Sync {
    /// Fails with [`AnalysisError::Config`] when the configuration is unusable.
    fn connect(&self) -> Result<Box<dyn CompletionProvider>, AnalysisError>;
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Value, AnalysisError> {
        Ok(self.chat_completion(request).await?)
    }
}

/// Factory for real OpenRouter clients
#[derive(Debug, Clone)]
pub struct OpenRouterFactory {
    config: ClientConfig,
}

impl OpenRouterFactory {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl ProviderFactory for OpenRouterFactory {
    fn connect(&self) -> Result<Box<dyn CompletionProvider>, AnalysisError> {
        let client = OpenRouterClient::new(self.config.clone())?;
        Ok(Box::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_without_key_is_config_error() {
        let factory = OpenRouterFactory::new(ClientConfig::default());
        let err = factory.connect().err().unwrap();
        assert!(matches!(err, AnalysisError::Config(_)));
        assert_eq!(err.code(), "openrouter_config_error");
    }

    #[test]
    fn test_factory_with_key_connects() {
        let factory = OpenRouterFactory::new(ClientConfig::new("sk-or-test"));
        assert!(factory.connect().is_ok());
    }
}
