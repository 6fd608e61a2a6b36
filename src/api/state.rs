use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        providers::{GeminiBackend, GenerativeBackend},
        AiGateway, Catalog, EngineSettings, GatewaySettings, SearchEngine,
    },
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    pub gateway: Arc<AiGateway>,
}

impl AppState {
    /// Wires the Gemini backend, gateway and search engine from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend = GeminiBackend::from_config(config)
            .map_err(|e| anyhow::anyhow!("Failed to create Gemini backend: {}", e))?;
        Ok(Self::with_backend(Arc::new(backend), config))
    }

    /// Builds the state on top of any generative backend
    pub fn with_backend(backend: Arc<dyn GenerativeBackend>, config: &Config) -> Self {
        let gateway = Arc::new(AiGateway::new(backend, GatewaySettings::from(config)));
        let engine = SearchEngine::new(
            Arc::new(Catalog::featured()),
            gateway.clone(),
            EngineSettings::from(config),
        );

        Self { engine, gateway }
    }
}
