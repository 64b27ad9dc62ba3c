//! POST /query — nearest-neighbor retrieval with optional answer synthesis.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use query_engine::QueryOutcome;
use tracing::debug;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::query::query_types::{QueryRequest, QueryResponse},
};

/// Matches to retrieve when the request leaves `top_k` unset.
const DEFAULT_TOP_K: usize = 5;

/// Handler: POST /query
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/query \
///   -H 'content-type: application/json' \
///   -d '{"embedding":[0.1,0.2],"top_k":5,"question":"What are the total number of crimes today?"}'
/// ```
pub async fn query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> AppResult<Json<QueryResponse>> {
    // Mistyped bodies (e.g. embedding as a string) become a 422 here,
    // before any external call.
    let Json(req) = payload?;
    let top_k = validate(&req)?;

    debug!(
        embedding_len = req.embedding.len(),
        top_k,
        has_question = req.question.is_some(),
        "query: start"
    );

    let outcome = state
        .engine
        .answer(&req.embedding, top_k, req.question.as_deref())
        .await?;

    let response = match outcome {
        QueryOutcome::Answered(composed) => QueryResponse::Answered {
            answer: composed.answer,
            sources: composed.sources,
            count: composed.count,
        },
        QueryOutcome::MatchesOnly(matches) => QueryResponse::MatchesOnly { matches },
    };

    Ok(Json(response))
}

/// Request-level validation; returns the effective `top_k`.
///
/// The embedding's dimensionality is checked downstream by the gateway,
/// which knows the index; here we only reject what is wrong on its face.
fn validate(req: &QueryRequest) -> Result<usize, AppError> {
    if req.embedding.is_empty() {
        return Err(AppError::Validation(
            "embedding must be a non-empty array of numbers".into(),
        ));
    }

    let top_k = req.top_k.unwrap_or(DEFAULT_TOP_K);
    if top_k == 0 {
        return Err(AppError::Validation(
            "top_k must be a positive integer".into(),
        ));
    }

    Ok(top_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(embedding: Vec<f32>, top_k: Option<usize>) -> QueryRequest {
        QueryRequest {
            embedding,
            top_k,
            question: None,
        }
    }

    #[test]
    fn empty_embedding_is_rejected() {
        let err = validate(&req(vec![], Some(5))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let err = validate(&req(vec![0.1], Some(0))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn top_k_defaults_when_unset() {
        assert_eq!(validate(&req(vec![0.1], None)).unwrap(), DEFAULT_TOP_K);
    }

    #[test]
    fn explicit_top_k_is_kept() {
        assert_eq!(validate(&req(vec![0.1], Some(12))).unwrap(), 12);
    }
}
