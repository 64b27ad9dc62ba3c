use llm_service::GenerationService;
use query_engine::QueryEngine;
use tracing::info;
use vector_gateway::{GatewayConfig, VectorIndexClient};

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// Holds the fully wired query pipeline; both outbound clients (vector
/// index, LLM provider) are built once here and reused across requests.
pub struct AppState {
    pub engine: QueryEngine<VectorIndexClient, GenerationService>,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// # Errors
    /// Any missing required variable or invalid credential setup fails here,
    /// at startup, before the listener binds.
    pub fn from_env() -> Result<Self, AppError> {
        let gateway_cfg = GatewayConfig::from_env()?;

        info!(
            collection = %gateway_cfg.collection,
            dim = gateway_cfg.dim,
            max_top_k = gateway_cfg.max_top_k,
            "vector gateway configured"
        );

        let source = VectorIndexClient::connect(gateway_cfg)?;
        let generator = GenerationService::from_env()?;

        Ok(Self {
            engine: QueryEngine::new(source, generator),
        })
    }
}
