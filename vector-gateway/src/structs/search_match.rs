//! Data types returned from the vector index. No query structs live here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One retrieved record from the vector index, ranked by similarity.
///
/// `metadata` carries whatever scalar payload the index stored alongside the
/// vector (e.g. `category`, `date`, `location`, `closest_station`). The
/// gateway does not interpret it; aggregation happens downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Opaque point id, unique within the index.
    pub id: String,
    /// Similarity score as reported by the index (higher = more similar).
    pub score: f32,
    /// Scalar payload stored with the vector.
    pub metadata: Map<String, Value>,
}
