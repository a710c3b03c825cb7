use crate::config::{ConfigError, ServiceConfig};
use analyzer::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let dispatcher = config.build_dispatcher()?;

        tracing::info!(
            mode = %dispatcher.mode(),
            model = %dispatcher.model(),
            "Analyzer ready"
        );

        Ok(Self { dispatcher })
    }

}
