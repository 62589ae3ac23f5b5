//! Ingestion Data Types
//!
//! Structures flowing through the batch pipeline: raw rows as read from the input
//! tables, normalized film rows ready for the merge, participant rows, and the report
//! summarizing one ETL run.

use chrono::NaiveDate;
use std::collections::HashMap;

/// One raw input row, keyed by column header.
///
/// Columns are kept as text exactly as read; every coercion happens in the normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub columns: HashMap<String, String>,
}

impl RawRow {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Returns the trimmed value of a column, or `None` when missing or blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A film row after field normalization, before derived fields are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFilm {
    pub id: Option<i64>,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub budget: f64,
    pub revenue: f64,
    pub popularity: f64,
    pub vote_count: u64,
    pub vote_average: f64,
    pub original_language: Option<String>,
    pub runtime: Option<f64>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub genres: Option<serde_json::Value>,
    pub belongs_to_collection: Option<serde_json::Value>,
    pub production_companies: Option<serde_json::Value>,
}

/// A film row after field normalization and derivation, before the participant merge.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFilm {
    pub id: Option<i64>,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub release_year: i32,
    pub budget: f64,
    pub revenue: f64,
    pub return_on_investment: f64,
    pub popularity: f64,
    pub vote_count: u64,
    pub vote_average: f64,
    pub original_language: Option<String>,
    pub runtime: Option<f64>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub genres: Option<serde_json::Value>,
    pub belongs_to_collection: Option<serde_json::Value>,
    pub production_companies: Option<serde_json::Value>,
}

/// Cast and crew for one film, as serialized text.
#[derive(Debug, Clone, PartialEq)]
pub struct Participants {
    pub id: Option<i64>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

/// Why a film row was left out of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    MissingDate,
    UnparseableDate,
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EtlReport {
    pub films_read: usize,
    pub excluded_missing_date: usize,
    pub excluded_unparseable_date: usize,
    pub malformed_records: usize,
    pub nested_fields_absent: usize,
    pub participants_read: usize,
    pub participants_kept: usize,
    pub catalog_rows: usize,
}

impl EtlReport {
    pub fn record_exclusion(&mut self, reason: ExclusionReason) {
        match reason {
            ExclusionReason::MissingDate => self.excluded_missing_date += 1,
            ExclusionReason::UnparseableDate => self.excluded_unparseable_date += 1,
        }
    }

    pub fn films_excluded(&self) -> usize {
        self.excluded_missing_date + self.excluded_unparseable_date
    }
}
