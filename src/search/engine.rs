use super::types::{Recommendation, RecommendationResponse, ScoredRow};
use super::vectorizer::TermIndex;
use crate::catalog::store::CatalogStore;
use crate::error::QueryError;

pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// Ranks every row except `query` by cosine similarity to it, highest first.
///
/// Vectors in the index are unit length (or zero), so the dot product is the cosine.
/// The sort is stable: equal similarities keep catalog row order.
pub fn rank_similar(index: &TermIndex, query: usize) -> Result<Vec<ScoredRow>, QueryError> {
    let target = index.vector(query).ok_or_else(|| {
        QueryError::Internal(format!("No term vector for catalog row {}", query))
    })?;

    let mut ranked: Vec<ScoredRow> = index
        .vectors()
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != query)
        .map(|(position, vector)| ScoredRow {
            position,
            similarity: target.dot(vector),
        })
        .collect();

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    Ok(ranked)
}

/// Returns the `n` films most similar to the film titled exactly `title`.
///
/// The title resolves to the first row with that exact title; there is no fuzzy
/// fallback. The query film never appears in its own results.
pub fn recommend(
    catalog: &CatalogStore,
    index: &TermIndex,
    title: &str,
    n: usize,
) -> Result<RecommendationResponse, QueryError> {
    if n == 0 {
        return Err(QueryError::InvalidInput(
            "n_recomendaciones debe ser al menos 1".to_string(),
        ));
    }
    if index.len() != catalog.len() {
        return Err(QueryError::Internal(format!(
            "Term index holds {} vectors but the catalog has {} rows",
            index.len(),
            catalog.len()
        )));
    }

    let query = catalog
        .rows()
        .iter()
        .position(|row| row.title == title)
        .ok_or_else(|| {
            QueryError::NotFound(format!("El título '{}' no se encuentra en el dataset.", title))
        })?;

    let recommendations = rank_similar(index, query)?
        .into_iter()
        .take(n)
        .filter_map(|scored| catalog.get(scored.position))
        .map(|row| Recommendation {
            title: row.title.clone(),
            overview: row.overview.clone(),
        })
        .collect();

    Ok(RecommendationResponse {
        title: title.to_string(),
        recommendations,
    })
}
