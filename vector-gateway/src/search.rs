//! Qdrant search glue: one reusable gRPC client and a top-k query path
//! using the modern `qdrant_client` API.
//!
//! The client is constructed once at startup and shared across requests;
//! each search is a single `search_points` call with an explicit timeout and
//! a single bounded retry. This module does **not** create collections or
//! upsert points — the index is owned and populated externally.

use std::time::Duration;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{ScoredPoint, SearchPointsBuilder};
use serde_json::Map;
use tracing::{debug, warn};

use crate::errors::gateway_error::GatewayError;
use crate::structs::gateway_config::GatewayConfig;
use crate::structs::search_match::SearchMatch;

/// Pause before the single retry of a failed search call.
const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Reusable client for the external vector index.
pub struct VectorIndexClient {
    client: Qdrant,
    cfg: GatewayConfig,
}

impl VectorIndexClient {
    /// Build the gRPC client from config. No network I/O happens here; the
    /// channel connects lazily on the first search.
    ///
    /// # Errors
    /// Returns [`GatewayError::InvalidConfig`] if the client cannot be
    /// constructed (e.g. malformed URL), so startup fails before serving.
    pub fn connect(cfg: GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder =
            Qdrant::from_url(&cfg.url).timeout(Duration::from_secs(cfg.timeout_secs));
        if let Some(key) = &cfg.api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::InvalidConfig(format!("qdrant client build: {e}")))?;

        Ok(Self { client, cfg })
    }

    /// The configured index dimensionality.
    pub fn dim(&self) -> usize {
        self.cfg.dim
    }

    /// Run k-NN search for a precomputed query embedding.
    ///
    /// The embedding is validated locally before any network call; `top_k`
    /// values above the configured maximum are clamped, not rejected. Hits
    /// come back in the index's descending-score order, payload included.
    ///
    /// # Errors
    /// - [`GatewayError::EmptyEmbedding`] / [`GatewayError::DimensionMismatch`]
    ///   when the embedding is unusable (no call is made).
    /// - [`GatewayError::Upstream`] when the index stays unreachable or
    ///   erroring after one retry. Never an empty `Ok` on failure.
    pub async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchMatch>, GatewayError> {
        validate_embedding(self.cfg.dim, embedding)?;
        let k = clamp_top_k(top_k, self.cfg.max_top_k);

        let make_request = || {
            SearchPointsBuilder::new(&self.cfg.collection, embedding.to_vec(), k as u64)
                .with_payload(true)
        };

        debug!(
            target: "vector_gateway::search",
            collection = %self.cfg.collection,
            top_k = k,
            "search_points: start"
        );

        let resp = match self.client.search_points(make_request()).await {
            Ok(resp) => resp,
            Err(first) => {
                warn!(
                    target: "vector_gateway::search",
                    error = %first,
                    "search_points failed, retrying once"
                );
                tokio::time::sleep(RETRY_BACKOFF).await;
                self.client.search_points(make_request()).await.map_err(|e| {
                    GatewayError::Upstream(format!("search_points: {e} (retry after: {first})"))
                })?
            }
        };

        let matches = resp
            .result
            .into_iter()
            .map(map_scored_point)
            .collect::<Vec<_>>();

        debug!(
            target: "vector_gateway::search",
            hits = matches.len(),
            "search_points: done"
        );

        Ok(matches)
    }
}

/// Reject embeddings the index cannot answer for, before any network call.
fn validate_embedding(dim: usize, embedding: &[f32]) -> Result<(), GatewayError> {
    if embedding.is_empty() {
        return Err(GatewayError::EmptyEmbedding);
    }
    if embedding.len() != dim {
        return Err(GatewayError::DimensionMismatch {
            expected: dim,
            got: embedding.len(),
        });
    }
    Ok(())
}

/// Oversized top-k is clamped to the configured maximum, not rejected.
fn clamp_top_k(requested: usize, max: usize) -> usize {
    requested.min(max)
}

/// Map a `ScoredPoint` into a [`SearchMatch`], converting the payload to
/// plain JSON values. Uuid and numeric point ids both render as strings.
fn map_scored_point(sp: ScoredPoint) -> SearchMatch {
    let id = match sp.id.and_then(|pid| pid.point_id_options) {
        Some(qdrant_client::qdrant::point_id::PointIdOptions::Uuid(s)) => s,
        Some(qdrant_client::qdrant::point_id::PointIdOptions::Num(n)) => n.to_string(),
        None => String::new(),
    };

    let mut metadata = Map::new();
    for (key, value) in sp.payload {
        metadata.insert(key, value.into_json());
    }

    SearchMatch {
        id,
        score: sp.score,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_small_requests() {
        assert_eq!(clamp_top_k(5, 50), 5);
    }

    #[test]
    fn clamp_caps_oversized_requests() {
        assert_eq!(clamp_top_k(500, 50), 50);
    }

    #[test]
    fn empty_embedding_is_rejected() {
        assert!(matches!(
            validate_embedding(384, &[]),
            Err(GatewayError::EmptyEmbedding)
        ));
    }

    #[test]
    fn wrong_dimensionality_is_rejected() {
        let emb = vec![0.1_f32; 3];
        match validate_embedding(384, &emb) {
            Err(GatewayError::DimensionMismatch { expected, got }) => {
                assert_eq!(expected, 384);
                assert_eq!(got, 3);
            }
            other => panic!("expected DimensionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn matching_dimensionality_passes() {
        let emb = vec![0.0_f32; 384];
        assert!(validate_embedding(384, &emb).is_ok());
    }
}
