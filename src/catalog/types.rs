//! Catalog Data Types
//!
//! `CatalogRow` is the snapshot schema: one row per film, normalized film fields merged
//! with its participants. The remaining structures are the response payloads of the
//! catalog queries; their serialized field names are the public API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub id: Option<i64>,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub release_year: i32,
    pub budget: f64,
    pub revenue: f64,
    #[serde(rename = "return")]
    pub return_on_investment: f64,
    pub popularity: f64,
    pub vote_count: u64,
    pub vote_average: f64,
    pub original_language: Option<String>,
    pub runtime: Option<f64>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    #[serde(with = "json_text")]
    pub genres: Option<serde_json::Value>,
    #[serde(with = "json_text")]
    pub belongs_to_collection: Option<serde_json::Value>,
    #[serde(with = "json_text")]
    pub production_companies: Option<serde_json::Value>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// Stores a nested value as JSON text inside a single flat column.
/// An absent value is an empty cell.
mod json_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<Value>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.filter(|s| !s.trim().is_empty()) {
            None => Ok(None),
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthCount {
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "cantidad")]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayCount {
    #[serde(rename = "dia")]
    pub weekday: String,
    #[serde(rename = "cantidad")]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleScore {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "año")]
    pub release_year: i32,
    #[serde(rename = "score")]
    pub popularity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleVotes {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "cantidad_votos")]
    pub vote_count: u64,
    #[serde(rename = "promedio_votos")]
    pub vote_average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    pub actor: String,
    #[serde(rename = "cantidad_filmaciones")]
    pub film_count: usize,
    #[serde(rename = "retorno_total")]
    pub total_return: f64,
    #[serde(rename = "promedio_retorno")]
    pub average_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorFilm {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "fecha_lanzamiento")]
    pub release_date: NaiveDate,
    #[serde(rename = "retorno")]
    pub return_on_investment: f64,
    #[serde(rename = "costo")]
    pub budget: f64,
    #[serde(rename = "ganancia")]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorStats {
    pub director: String,
    #[serde(rename = "retorno_total")]
    pub total_return: f64,
    #[serde(rename = "peliculas")]
    pub films: Vec<DirectorFilm>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}
