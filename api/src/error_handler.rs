use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use query_engine::EngineError;
use serde::Serialize;
use thiserror::Error;
use vector_gateway::{GatewayError, SearchMatch};

/// Public application error type.
///
/// Mirrors the service's error taxonomy: validation (4xx, caller fixes the
/// input), upstream/generation (5xx, transient), configuration (startup
/// only — the process refuses to serve).
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / pipeline ---
    /// Malformed request; detected before any external call.
    #[error("{0}")]
    Validation(String),

    /// The vector index was unreachable or erroring.
    #[error("{0}")]
    Upstream(String),

    /// Answer generation failed; the retrieved sources are still returned
    /// in the error body so the client can see what was found.
    #[error("{message}")]
    Generation {
        message: String,
        sources: Vec<SearchMatch>,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // startup-only; never a meaningful request status
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 4xx
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 5xx
            AppError::Upstream(_) | AppError::Generation { .. } => StatusCode::BAD_GATEWAY,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream(_) => "UPSTREAM_UNAVAILABLE",
            AppError::Generation { .. } => "GENERATION_FAILED",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<SearchMatch>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.error_code();
        let message = self.to_string();
        let sources = match self {
            AppError::Generation { sources, .. } => Some(sources),
            _ => None,
        };

        let body = ErrorBody {
            error,
            message,
            sources,
        };

        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed/mistyped JSON bodies report as validation failures, without
/// any external call having been made.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Gateway errors split by class: bad input vs. startup config vs. upstream.
impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::EmptyEmbedding | GatewayError::DimensionMismatch { .. } => {
                AppError::Validation(err.to_string())
            }
            GatewayError::EnvMissing { .. }
            | GatewayError::EnvParse { .. }
            | GatewayError::InvalidConfig(_) => AppError::Config(err.to_string()),
            GatewayError::Upstream(msg) => AppError::Upstream(msg),
        }
    }
}

/// LLM errors reach this crate only while building `AppState` (the engine
/// wraps request-time generation failures itself).
impl From<llm_service::LlmError> for AppError {
    fn from(err: llm_service::LlmError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(msg) => AppError::Validation(msg),
            EngineError::Upstream(msg) => AppError::Upstream(msg),
            EngineError::Generation { message, sources } => {
                AppError::Generation { message, sources }
            }
        }
    }
}
