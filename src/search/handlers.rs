use super::engine::{DEFAULT_RECOMMENDATIONS, recommend};
use super::types::RecommendationResponse;
use crate::error::QueryError;
use crate::snapshot::Snapshot;
use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

/// Raw query parameters. A count that is not a non-negative integer is `invalid_input`.
#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub n_recomendaciones: Option<String>,
}

impl RecommendationParams {
    pub fn count(&self) -> Result<usize, QueryError> {
        match self.n_recomendaciones.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_RECOMMENDATIONS),
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                QueryError::InvalidInput(format!(
                    "n_recomendaciones debe ser un entero positivo, se recibió '{}'",
                    raw
                ))
            }),
        }
    }
}

pub async fn handle_recommendations(
    Path(title): Path<String>,
    Query(params): Query<RecommendationParams>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
) -> Result<Json<RecommendationResponse>, QueryError> {
    let n = params.count()?;

    // Scoring walks the whole index; keep it off the async workers.
    let response = tokio::task::spawn_blocking(move || {
        recommend(&snapshot.catalog, &snapshot.index, &title, n)
    })
    .await
    .map_err(|e| QueryError::Internal(format!("Error procesando la solicitud: {}", e)))??;

    Ok(Json(response))
}
