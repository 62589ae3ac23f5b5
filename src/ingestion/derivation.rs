//! Derivation Engine
//!
//! Computes `release_year` and `return_on_investment` from normalized fields.

use super::types::{CanonicalFilm, NormalizedFilm};
use chrono::{Datelike, NaiveDate};

pub fn release_year(date: NaiveDate) -> i32 {
    date.year()
}

/// `revenue / budget` when `budget > 0`, otherwise exactly `0.0`. Never NaN or infinite.
pub fn return_on_investment(revenue: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        let ratio = revenue / budget;
        if ratio.is_finite() { ratio } else { 0.0 }
    } else {
        0.0
    }
}

pub fn derive(film: CanonicalFilm) -> NormalizedFilm {
    NormalizedFilm {
        release_year: release_year(film.release_date),
        return_on_investment: return_on_investment(film.revenue, film.budget),
        id: film.id,
        title: film.title,
        overview: film.overview,
        release_date: film.release_date,
        budget: film.budget,
        revenue: film.revenue,
        popularity: film.popularity,
        vote_count: film.vote_count,
        vote_average: film.vote_average,
        original_language: film.original_language,
        runtime: film.runtime,
        status: film.status,
        tagline: film.tagline,
        genres: film.genres,
        belongs_to_collection: film.belongs_to_collection,
        production_companies: film.production_companies,
    }
}
