use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, error, warn};

use super::error::{OpenRouterError, OpenRouterResult};
use super::types::{ChatCompletionRequest, OpenRouterErrorBody};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

const DEFAULT_APP_NAME: &str = "Insight2Spec";
const DEFAULT_REFERER: &str = "https://insight2spec.local";
const ERROR_EXCERPT_CHARS: usize = 300;

/// Settings needed to build an [`OpenRouterClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer credential; `None` or blank fails client construction
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    /// Sent as `X-Title`
    pub app_name: String,
    /// Sent as `HTTP-Referer`
    pub referer: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            app_name: DEFAULT_APP_NAME.to_string(),
            referer: DEFAULT_REFERER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for OpenRouter API
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
    app_name: String,
    referer: String,
}

impl OpenRouterClient {
    pub fn new(config: ClientConfig) -> OpenRouterResult<Self> {
        let api_key = config
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| OpenRouterError::Config("OPENROUTER_API_KEY is required".to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OpenRouterError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            app_name: config.app_name,
            referer: config.referer,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Issue one chat completion and return the raw response body.
    ///
    /// Any 2xx response whose body is JSON is returned untouched.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> OpenRouterResult<serde_json::Value> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            timeout_secs = self.timeout.as_secs_f64(),
            "Creating chat completion"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_name)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e, started))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e, started))?;

        if !status.is_success() {
            let error_text = String::from_utf8_lossy(&body);
            let message = match serde_json::from_str::<OpenRouterErrorBody>(&error_text) {
                Ok(error_resp) => {
                    error!(
                        "OpenRouter API error: {} (type: {:?})",
                        error_resp.error.message, error_resp.error.error_type
                    );
                    error_resp.error.message
                }
                Err(_) => {
                    error!("OpenRouter API error: HTTP {}", status.as_u16());
                    error_text.to_string()
                }
            };

            return Err(OpenRouterError::Api {
                status_code: status.as_u16(),
                message: excerpt(&message, ERROR_EXCERPT_CHARS),
            });
        }

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chat completion received"
        );

        serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "OpenRouter returned a non-JSON body");
            OpenRouterError::InvalidBody(e.to_string())
        })
    }

    fn map_send_error(&self, err: reqwest::Error, started: Instant) -> OpenRouterError {
        if err.is_timeout() {
            warn!(
                timeout_secs = self.timeout.as_secs_f64(),
                "OpenRouter request timed out"
            );
            return OpenRouterError::Timeout {
                timeout: self.timeout,
                elapsed: started.elapsed(),
            };
        }

        warn!(error = %err, "OpenRouter request failed before response");
        OpenRouterError::Transport(err.to_string())
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
