//! GET /health — liveness only.
//!
//! Answers from process memory with a fixed payload; no downstream service
//! is consulted, so this succeeds as long as the process runs.

use axum::Json;
use serde_json::{Value, json};

/// Handler: GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_a_fixed_payload() {
        let Json(body) = health().await;
        assert_eq!(body, json!({ "status": "healthy" }));
    }
}
