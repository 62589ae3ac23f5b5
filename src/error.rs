//! Query Error Taxonomy
//!
//! Every query operation returns `Result<T, QueryError>`. A missing match or an
//! out-of-vocabulary parameter is a value the caller inspects, never a panic.
//!
//! Field-level (`ParseFailure`) and row-level (`RowExcluded`) problems during ETL are
//! not represented here: they are recovered locally and only counted in the
//! `EtlReport` (see `ingestion::types`).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// The target entity (film, actor, director) does not exist in the catalog.
    #[error("{0}")]
    NotFound(String),
    /// A parameter lies outside its recognized vocabulary or range.
    #[error("{0}")]
    InvalidInput(String),
    /// The entity exists but does not carry enough data to answer.
    #[error("{0}")]
    InsufficientData(String),
    /// Unexpected fault while computing a result.
    #[error("{0}")]
    Internal(String),
}

impl QueryError {
    /// Classification string exposed to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::NotFound(_) => "not_found",
            QueryError::InvalidInput(_) => "invalid_input",
            QueryError::InsufficientData(_) => "insufficient_data",
            QueryError::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::NotFound(_) => StatusCode::NOT_FOUND,
            QueryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            QueryError::InsufficientData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            QueryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            kind: self.kind().to_string(),
        }
    }
}

/// Structured error payload returned over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        match &self {
            QueryError::Internal(msg) => tracing::error!("Query failed: {}", msg),
            other => tracing::debug!("Query rejected ({}): {}", other.kind(), other),
        }
        (self.status_code(), Json(self.to_body())).into_response()
    }
}
