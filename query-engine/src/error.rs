//! Typed errors for the query engine.

use thiserror::Error;
use vector_gateway::{GatewayError, SearchMatch};

/// Errors surfaced by [`crate::QueryEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request input was unusable; no external service was called.
    #[error("validation error: {0}")]
    Validation(String),

    /// The vector index was unreachable or returned an error.
    #[error("vector index unavailable: {0}")]
    Upstream(String),

    /// The language-model call failed. The retrieved matches travel with
    /// the error so callers can still show the sources.
    #[error("answer generation failed: {message}")]
    Generation {
        message: String,
        sources: Vec<SearchMatch>,
    },
}

impl From<GatewayError> for EngineError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::EmptyEmbedding | GatewayError::DimensionMismatch { .. } => {
                EngineError::Validation(err.to_string())
            }
            other => EngineError::Upstream(other.to_string()),
        }
    }
}

/// Failure reported by an [`crate::AnswerGenerator`] implementation.
///
/// Kept separate from [`EngineError`] so the composer decides what context
/// (the retrieved sources) to attach when it propagates the failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct GenerationError(pub String);
