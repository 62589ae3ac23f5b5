use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub overview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "recomendaciones")]
    pub recommendations: Vec<Recommendation>,
}

/// A ranked neighbour: catalog row position and its similarity to the query film.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    pub position: usize,
    pub similarity: f32,
}
