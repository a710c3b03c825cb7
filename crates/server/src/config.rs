use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use analyzer::dispatcher::DEFAULT_MODEL;
use analyzer::{CatalogError, Dispatcher, OpenRouterFactory, ThemeCatalog};
use insight_core::AnalysisMode;
use openrouter::{ClientConfig, DEFAULT_BASE_URL};
use thiserror::Error;
use tracing::{debug, warn};

pub const ENV_ANALYZE_MODE: &str = "INSIGHT2SPEC_ANALYZE_MODE";
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_TIMEOUT_SECONDS: &str = "OPENROUTER_TIMEOUT_SECONDS";
pub const ENV_MODEL: &str = "OPENROUTER_MODEL";
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_THEMES_FILE: &str = "INSIGHT2SPEC_THEMES_FILE";

const DEFAULT_TIMEOUT_SECONDS: f64 = 20.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{ENV_TIMEOUT_SECONDS} must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Process-wide settings, resolved once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub mode: AnalysisMode,
    /// Absent or blank means delegated requests fail with a configuration error
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub model: String,
    pub base_url: String,
    pub themes_file: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Mock,
            api_key: None,
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECONDS),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            themes_file: None,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; unset and blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let mode = match get(ENV_ANALYZE_MODE) {
            Some(raw) => AnalysisMode::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unknown {}, using mock mode", ENV_ANALYZE_MODE);
                AnalysisMode::Mock
            }),
            None => defaults.mode,
        };

        let timeout = match get(ENV_TIMEOUT_SECONDS) {
            Some(raw) => parse_timeout(&raw)?,
            None => defaults.timeout,
        };

        let config = Self {
            mode,
            api_key: get(ENV_API_KEY),
            timeout,
            model: get(ENV_MODEL).unwrap_or(defaults.model),
            base_url: get(ENV_BASE_URL).unwrap_or(defaults.base_url),
            themes_file: get(ENV_THEMES_FILE).map(PathBuf::from),
        };

        debug!(
            mode = %config.mode,
            model = %config.model,
            timeout_secs = config.timeout.as_secs_f64(),
            api_key = %config.masked_api_key(),
            "Service configuration resolved"
        );

        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            ..ClientConfig::default()
        }
        .base_url(&self.base_url)
        .timeout(self.timeout)
    }

    pub fn load_catalog(&self) -> Result<ThemeCatalog, ConfigError> {
        match &self.themes_file {
            Some(path) => Ok(ThemeCatalog::load(path)?),
            None => Ok(ThemeCatalog::builtin()),
        }
    }

    pub fn build_dispatcher(&self) -> Result<Dispatcher, ConfigError> {
        if self.mode.is_delegated() && self.api_key.is_none() {
            warn!(
                "{} is openrouter but {} is not set; analyze requests will fail",
                ENV_ANALYZE_MODE, ENV_API_KEY
            );
        }

        let factory = OpenRouterFactory::new(self.client_config());
        Ok(Dispatcher::new(self.mode, Arc::new(factory))
            .with_model(&self.model)
            .with_catalog(self.load_catalog()?))
    }

    /// Credential suitable for logs and status output
    pub fn masked_api_key(&self) -> String {
        match &self.api_key {
            None => "<unset>".to_string(),
            Some(key) if key.chars().count() <= 8 => "****".to_string(),
            Some(key) => {
                let prefix: String = key.chars().take(4).collect();
                format!("{}****", prefix)
            }
        }
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(Duration::from_secs_f64(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
