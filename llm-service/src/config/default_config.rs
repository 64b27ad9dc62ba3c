//! Default LLM configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], grouped by provider.
//! The selected provider's API key is required and checked here, so a
//! missing credential fails process startup rather than the first request.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`anthropic` (default) | `openai`)
//! - `LLM_MODEL`        = optional model override
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32, default 512)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 30)
//!
//! Anthropic-specific:
//! - `CLAUDE_API_KEY` (mandatory)
//! - `CLAUDE_API_URL` (default: `https://api.anthropic.com`)
//!
//! OpenAI-specific:
//! - `OPENAI_API_KEY` (mandatory)
//! - `OPENAI_API_URL` (default: `https://api.openai.com`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{LlmError, env_opt_u32, env_opt_u64, must_env, validate_http_endpoint},
};

const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 512;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Build the generation config for the provider named by `LLM_KIND`
/// (defaulting to Anthropic).
pub fn config_from_env() -> Result<LlmModelConfig, LlmError> {
    let kind = std::env::var("LLM_KIND").unwrap_or_else(|_| "anthropic".into());
    match LlmProvider::parse(&kind)? {
        LlmProvider::Anthropic => config_anthropic(),
        LlmProvider::OpenAI => config_openai(),
    }
}

/// Construct the Anthropic generation config from the environment.
///
/// # Errors
/// [`crate::error_handler::ConfigError::MissingVar`] when `CLAUDE_API_KEY`
/// is absent; format/number errors for malformed overrides.
pub fn config_anthropic() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("CLAUDE_API_KEY")?;
    let endpoint =
        std::env::var("CLAUDE_API_URL").unwrap_or_else(|_| "https://api.anthropic.com".into());
    validate_http_endpoint("CLAUDE_API_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Anthropic,
        model: model_or(DEFAULT_ANTHROPIC_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Construct the OpenAI generation config from the environment.
///
/// # Errors
/// [`crate::error_handler::ConfigError::MissingVar`] when `OPENAI_API_KEY`
/// is absent; format/number errors for malformed overrides.
pub fn config_openai() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let endpoint =
        std::env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com".into());
    validate_http_endpoint("OPENAI_API_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: model_or(DEFAULT_OPENAI_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

fn model_or(default: &str) -> String {
    std::env::var("LLM_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
