use crate::error_handler::{ConfigError, LlmError};

/// The backend used for answer generation.
///
/// Adding more providers (e.g., a local runtime) means extending this enum
/// and giving the new variant a client under `services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Anthropic messages API.
    Anthropic,
    /// OpenAI chat completions API.
    OpenAI,
}

impl LlmProvider {
    /// Parse a provider name as it appears in `LLM_KIND` (case-insensitive).
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] for unknown names.
    pub fn parse(kind: &str) -> Result<Self, LlmError> {
        match kind.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_parse() {
        assert_eq!(LlmProvider::parse("anthropic").unwrap(), LlmProvider::Anthropic);
        assert_eq!(LlmProvider::parse("Claude").unwrap(), LlmProvider::Anthropic);
        assert_eq!(LlmProvider::parse("openai").unwrap(), LlmProvider::OpenAI);
        assert_eq!(LlmProvider::parse("ChatGPT").unwrap(), LlmProvider::OpenAI);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(LlmProvider::parse("mistral").is_err());
    }
}
