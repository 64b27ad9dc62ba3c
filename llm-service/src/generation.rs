//! Single-profile generation facade.
//!
//! Construct once at startup (the provider client and its HTTP connection
//! pool are reused across requests), wrap in `Arc`, and pass clones to
//! dependents. Unlike a multi-profile setup there is exactly one generation
//! role here, so provider dispatch happens once in the constructor instead
//! of per call.

use tracing::info;

use crate::{
    config::{
        default_config::config_from_env, llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::LlmError,
    services::{anthropic_service::AnthropicService, open_ai_service::OpenAiService},
};

/// Provider client selected at construction time.
enum ProviderClient {
    Anthropic(AnthropicService),
    OpenAI(OpenAiService),
}

/// Shared answer-generation service.
pub struct GenerationService {
    client: ProviderClient,
    model: String,
}

impl GenerationService {
    /// Build the provider client named by the config.
    ///
    /// # Errors
    /// Propagates constructor validation from the provider client
    /// (provider mismatch, missing key, bad endpoint).
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        let model = cfg.model.clone();
        let client = match cfg.provider {
            LlmProvider::Anthropic => ProviderClient::Anthropic(AnthropicService::new(cfg)?),
            LlmProvider::OpenAI => ProviderClient::OpenAI(OpenAiService::new(cfg)?),
        };

        info!(model = %model, "GenerationService initialized");

        Ok(Self { client, model })
    }

    /// Build from environment variables (`LLM_KIND` selects the provider).
    ///
    /// # Errors
    /// Config errors (missing key, unsupported provider) surface here, at
    /// startup.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(config_from_env()?)
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate answer text for a prompt, optionally steered by a system
    /// instruction.
    ///
    /// # Errors
    /// Returns [`LlmError`] when the provider call fails or times out; the
    /// caller decides how to degrade.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        match &self.client {
            ProviderClient::Anthropic(cli) => cli.generate(prompt, system).await,
            ProviderClient::OpenAI(cli) => cli.generate(prompt, system).await,
        }
    }
}
