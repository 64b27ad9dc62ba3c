//! Anthropic (Claude) service for text generation.
//!
//! Minimal, non-streaming client around the messages API:
//! - POST {endpoint}/v1/messages
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Anthropic`
//! - `cfg.api_key` must be present (sent as the `x-api-key` header)
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via the unified types in `error_handler`.

use std::time::Duration;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{HttpError, LlmError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Protocol version the messages API requires on every request.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Thin client for the Anthropic messages API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (timeout + default headers) and the
/// precomputed request URL, reused across calls.
#[derive(Debug)]
pub struct AnthropicService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_messages: String,
}

impl AnthropicService {
    /// Create a new [`AnthropicService`] from the given config.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::InvalidProvider`] if `cfg.provider` is not Anthropic
    /// - [`ProviderErrorKind::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, LlmError> {
        if cfg.provider != LlmProvider::Anthropic {
            return Err(ProviderError::new(
                LlmProvider::Anthropic,
                ProviderErrorKind::InvalidProvider,
            )
            .into());
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(LlmProvider::Anthropic, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                LlmProvider::Anthropic,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::HeaderName::from_static("x-api-key"),
            header::HeaderValue::from_str(&api_key).map_err(|e| {
                ProviderError::new(
                    LlmProvider::Anthropic,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            header::HeaderName::from_static("anthropic-version"),
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_messages = format!("{}/v1/messages", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(30),
            "AnthropicService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_messages,
        })
    }

    /// Perform a **non-streaming** messages request.
    ///
    /// The prompt goes in as a single user message; `system` maps to the
    /// top-level `system` field. The answer is the concatenation of all
    /// returned text content blocks.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures (timeouts included)
    /// - [`ProviderErrorKind::Decode`] if the JSON cannot be parsed
    /// - [`ProviderErrorKind::EmptyContent`] if no text block is returned
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, LlmError> {
        let body = MessagesRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_messages
        );

        let resp = self
            .client
            .post(&self.url_messages)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_messages.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                "Anthropic /v1/messages returned non-success status"
            );

            return Err(ProviderError::new(
                LlmProvider::Anthropic,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: MessagesResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                LlmProvider::Anthropic,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `content[].text`"
                )),
            )
        })?;

        let answer = join_text_blocks(&out.content);
        if answer.is_empty() {
            return Err(ProviderError::new(
                LlmProvider::Anthropic,
                ProviderErrorKind::EmptyContent,
            )
            .into());
        }

        Ok(answer)
    }
}

/// Concatenate the `text` of every text-typed content block.
fn join_text_blocks(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter_map(|b| b.text.as_deref())
        .collect::<Vec<_>>()
        .join("")
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/messages` (non-streaming).
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    /// Required by the API; falls back to 512 when the config leaves it unset.
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> MessagesRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            model: &cfg.model,
            max_tokens: cfg.max_tokens.unwrap_or(512),
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            system,
            temperature: cfg.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal response shape: the generated text lives in `content[].text`.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_blocks_are_joined_in_order() {
        let blocks = vec![
            ContentBlock {
                text: Some("The safest".into()),
            },
            ContentBlock { text: None },
            ContentBlock {
                text: Some(" line is U2.".into()),
            },
        ];
        assert_eq!(join_text_blocks(&blocks), "The safest line is U2.");
    }

    #[test]
    fn wrong_provider_is_rejected() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: Some("sk-test".into()),
            max_tokens: Some(512),
            temperature: None,
            timeout_secs: Some(30),
        };
        assert!(AnthropicService::new(cfg).is_err());
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Anthropic,
            model: "claude-3-haiku-20240307".into(),
            endpoint: "https://api.anthropic.com".into(),
            api_key: None,
            max_tokens: Some(512),
            temperature: None,
            timeout_secs: Some(30),
        };
        assert!(AnthropicService::new(cfg).is_err());
    }
}
