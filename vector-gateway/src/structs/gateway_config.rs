//! Configuration layer: reads vector-index settings from environment
//! variables once at startup and exposes a strongly typed config.

use crate::errors::gateway_error::GatewayError;

/// Qdrant connectivity and search parameters.
///
/// Built once via [`GatewayConfig::from_env`] and passed by reference into
/// the client; handlers never read the environment at call time.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// gRPC URL for Qdrant (e.g., "http://localhost:6334").
    pub url: String,
    /// Optional API key, passed through to the index service.
    pub api_key: Option<String>,
    /// Collection holding the incident embeddings.
    pub collection: String,
    /// Vector dimensionality of the index (query embeddings must match).
    pub dim: usize,
    /// Hard cap on top-k; larger requests are clamped, not rejected.
    pub max_top_k: usize,
    /// Per-request timeout for search calls, in seconds.
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `QDRANT_URL` (required)
    /// - `QDRANT_API_KEY` (optional)
    /// - `QDRANT_COLLECTION` (required)
    /// - `EMBEDDING_DIM` (required, > 0)
    /// - `SEARCH_MAX_TOP_K` (default: 50)
    /// - `SEARCH_TIMEOUT_SECS` (default: 5)
    ///
    /// # Errors
    /// Returns [`GatewayError::EnvMissing`] / [`GatewayError::EnvParse`] /
    /// [`GatewayError::InvalidConfig`] so startup can fail before the
    /// listener binds.
    pub fn from_env() -> Result<Self, GatewayError> {
        let url = must_env("QDRANT_URL")?;
        let collection = must_env("QDRANT_COLLECTION")?;
        let api_key = std::env::var("QDRANT_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let dim = read_usize_env("EMBEDDING_DIM")?
            .ok_or(GatewayError::EnvMissing {
                key: "EMBEDDING_DIM".into(),
            })?;
        let max_top_k = read_usize_env("SEARCH_MAX_TOP_K")?.unwrap_or(50);
        let timeout_secs = read_usize_env("SEARCH_TIMEOUT_SECS")?.unwrap_or(5) as u64;

        if dim == 0 {
            return Err(GatewayError::InvalidConfig(
                "EMBEDDING_DIM must be > 0".into(),
            ));
        }
        if max_top_k == 0 {
            return Err(GatewayError::InvalidConfig(
                "SEARCH_MAX_TOP_K must be > 0".into(),
            ));
        }

        Ok(Self {
            url,
            api_key,
            collection,
            dim,
            max_top_k,
            timeout_secs,
        })
    }
}

/// Fetch a required, non-empty environment variable.
fn must_env(key: &str) -> Result<String, GatewayError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(GatewayError::EnvMissing { key: key.into() }),
    }
}

/// Read an optional `usize` from env; `Ok(None)` when unset or empty.
fn read_usize_env(key: &str) -> Result<Option<usize>, GatewayError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => {
            v.parse::<usize>()
                .map(Some)
                .map_err(|_| GatewayError::EnvParse {
                    key: key.into(),
                    value: v,
                })
        }
        _ => Ok(None),
    }
}
