use serde::{Deserialize, Serialize};
use vector_gateway::SearchMatch;

/// Request payload for /query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Precomputed query embedding; length must match the index.
    pub embedding: Vec<f32>,
    /// Optional override: number of matches to retrieve (default 5;
    /// oversized values are clamped by the gateway).
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Optional natural-language question. Absent → retrieval only.
    #[serde(default)]
    pub question: Option<String>,
}

/// Response payload for /query.
///
/// Untagged: an answered query serializes as `{answer, sources, count?}`,
/// a retrieval-only query as `{matches}`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Answered {
        /// Final answer text (deterministic aggregate or model output).
        answer: String,
        /// Matches that ground the answer, in retrieval order.
        sources: Vec<SearchMatch>,
        /// Aggregate count, present for counting intents only.
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<u64>,
    },
    MatchesOnly {
        matches: Vec<SearchMatch>,
    },
}
