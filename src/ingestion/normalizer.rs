//! Field Normalizer
//!
//! Coerces raw text columns into the canonical film schema. Every coercion is total:
//! numeric and nested fields fall back to a documented default, while a missing or
//! unparseable `release_date` excludes the row because the time-based queries need it.

use super::literal::parse_literal;
use super::types::{CanonicalFilm, ExclusionReason, Participants, RawRow};
use chrono::{NaiveDate, NaiveDateTime};

/// Columns with no use for querying, removed before normalization.
pub const DROPPED_COLUMNS: [&str; 6] = [
    "video",
    "imdb_id",
    "adult",
    "original_title",
    "poster_path",
    "homepage",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Result of normalizing one film row.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub film: CanonicalFilm,
    /// Nested fields that held text but failed to decode and were set to absent.
    pub parse_failures: usize,
}

/// Removes the given columns from a row. Missing columns are ignored.
pub fn drop_columns(row: &mut RawRow, columns: &[&str]) {
    for column in columns {
        row.columns.remove(*column);
    }
}

pub fn normalize_film(row: &RawRow) -> Result<Normalized, ExclusionReason> {
    let release_date = match row.get("release_date") {
        None => return Err(ExclusionReason::MissingDate),
        Some(raw) => parse_release_date(raw).ok_or(ExclusionReason::UnparseableDate)?,
    };

    let mut parse_failures = 0;
    let mut nested = |column: &str| match try_decode_nested(row.get(column)) {
        Ok(value) => value,
        Err(()) => {
            parse_failures += 1;
            None
        }
    };
    let genres = nested("genres");
    let belongs_to_collection = nested("belongs_to_collection");
    let production_companies = nested("production_companies");

    let film = CanonicalFilm {
        id: coerce_id(row.get("id")),
        title: row.get("title").unwrap_or_default().to_string(),
        overview: row.get("overview").unwrap_or_default().to_string(),
        release_date,
        budget: coerce_number(row.get("budget")),
        revenue: coerce_number(row.get("revenue")),
        popularity: coerce_number(row.get("popularity")),
        vote_count: coerce_count(row.get("vote_count")),
        vote_average: coerce_number(row.get("vote_average")),
        original_language: row.get("original_language").map(str::to_string),
        runtime: row.get("runtime").and_then(parse_finite),
        status: row.get("status").map(str::to_string),
        tagline: row.get("tagline").map(str::to_string),
        genres,
        belongs_to_collection,
        production_companies,
    };

    Ok(Normalized {
        film,
        parse_failures,
    })
}

pub fn normalize_participants(row: &RawRow) -> Participants {
    Participants {
        id: coerce_id(row.get("id")),
        cast: row.get("cast").map(str::to_string),
        crew: row.get("crew").map(str::to_string),
    }
}

/// Parses a release date, accepting ISO dates, slash-separated dates, ISO datetimes
/// (time discarded) and bare years (January 1st).
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        return raw
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    None
}

/// Coerces a numeric column; missing, non-numeric or non-finite input becomes `0.0`.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    raw.and_then(parse_finite).unwrap_or(0.0)
}

/// Coerces a join identifier. Integral values written as floats (`"862.0"`) are
/// accepted; anything else is absent.
pub fn coerce_id(raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }
    parse_finite(raw)
        .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
        .map(|v| v as i64)
}

fn coerce_count(raw: Option<&str>) -> u64 {
    coerce_number(raw).max(0.0).round() as u64
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decodes a nested field. Blank input is absent; undecodable input is `Err(())`.
fn try_decode_nested(raw: Option<&str>) -> Result<Option<serde_json::Value>, ()> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match parse_literal(raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!("Nested field set to absent: {}", e);
            Err(())
        }
    }
}

/// Decodes a nested field, mapping any failure to absent.
pub fn decode_nested(raw: Option<&str>) -> Option<serde_json::Value> {
    try_decode_nested(raw).unwrap_or(None)
}
