//! Unified error type for the vector-gateway crate.

use thiserror::Error;

/// Errors produced by the vector search gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Required environment variable is missing.
    #[error("missing env variable: {key}")]
    EnvMissing { key: String },

    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Request validation (no network call was made) ───────────────────────
    /// The query embedding was empty.
    #[error("query embedding must not be empty")]
    EmptyEmbedding,

    /// The query embedding does not match the index dimensionality.
    #[error("query embedding length {got} != index dimensionality {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    // ── Upstream index ───────────────────────────────────────────────────────
    /// The remote vector index was unreachable or returned an error.
    #[error("vector index error: {0}")]
    Upstream(String),
}
