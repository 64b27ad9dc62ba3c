use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM generation invocation.
///
/// Built once at startup (usually via `default_config`) and handed to the
/// provider client; nothing here is re-read from the environment later.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The provider/backend to call.
    pub provider: LlmProvider,

    /// Model identifier (e.g., `"claude-3-haiku-20240307"`, `"gpt-4o-mini"`).
    pub model: String,

    /// API base URL (without the operation path).
    pub endpoint: String,

    /// API key for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature, when a caller wants to pin it.
    pub temperature: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}
