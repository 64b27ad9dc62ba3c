//! Shared LLM generation service.
//!
//! Thin, non-streaming clients for the supported providers (Anthropic
//! messages API, OpenAI chat completions) behind one [`GenerationService`]
//! facade, with unified errors and strictly env-driven default configs.
//!
//! Embeddings are deliberately absent: callers of this backend submit
//! precomputed query vectors, so the only LLM concern here is answer
//! generation.

pub mod config;
pub mod error_handler;
pub mod generation;
pub mod services;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmError;
pub use generation::GenerationService;
