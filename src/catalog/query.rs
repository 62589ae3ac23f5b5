//! Catalog Query Service
//!
//! Read-only scans over the loaded catalog. Matching by title, cast or crew is a
//! case-insensitive substring test applied as a linear scan in catalog row order;
//! "first match" operations return the lowest matching row position.

use super::store::CatalogStore;
use super::types::{
    ActorStats, CatalogRow, DirectorFilm, DirectorStats, MonthCount, TitleScore, TitleVotes,
    WeekdayCount,
};
use crate::error::QueryError;
use chrono::Datelike;

/// Minimum `vote_count` for a film's vote statistics to be reported.
pub const MIN_VOTES: u64 = 2000;

const MONTHS: [(&str, u32); 12] = [
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

// Monday = 0.
const WEEKDAYS: [(&str, u32); 7] = [
    ("lunes", 0),
    ("martes", 1),
    ("miércoles", 2),
    ("jueves", 3),
    ("viernes", 4),
    ("sábado", 5),
    ("domingo", 6),
];

pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    MONTHS.iter().find(|(m, _)| *m == name).map(|(_, n)| *n)
}

pub fn weekday_number(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    WEEKDAYS.iter().find(|(d, _)| *d == name).map(|(_, n)| *n)
}

pub fn count_by_month(catalog: &CatalogStore, month: &str) -> Result<MonthCount, QueryError> {
    let number =
        month_number(month).ok_or_else(|| QueryError::InvalidInput("Mes inválido".to_string()))?;
    let count = catalog
        .rows()
        .iter()
        .filter(|row| row.release_date.month() == number)
        .count();

    Ok(MonthCount {
        month: month.to_string(),
        count,
    })
}

pub fn count_by_weekday(catalog: &CatalogStore, weekday: &str) -> Result<WeekdayCount, QueryError> {
    let number = weekday_number(weekday)
        .ok_or_else(|| QueryError::InvalidInput("Día inválido".to_string()))?;
    let count = catalog
        .rows()
        .iter()
        .filter(|row| row.release_date.weekday().num_days_from_monday() == number)
        .count();

    Ok(WeekdayCount {
        weekday: weekday.to_string(),
        count,
    })
}

pub fn score_by_title(catalog: &CatalogStore, title: &str) -> Result<TitleScore, QueryError> {
    let row = first_title_match(catalog, title)?;
    Ok(TitleScore {
        title: row.title.clone(),
        release_year: row.release_year,
        popularity: row.popularity,
    })
}

pub fn votes_by_title(catalog: &CatalogStore, title: &str) -> Result<TitleVotes, QueryError> {
    let row = first_title_match(catalog, title)?;
    if row.vote_count < MIN_VOTES {
        return Err(QueryError::InsufficientData(
            "La película no tiene suficientes votos".to_string(),
        ));
    }
    Ok(TitleVotes {
        title: row.title.clone(),
        vote_count: row.vote_count,
        vote_average: row.vote_average,
    })
}

/// Aggregates `return_on_investment` over every row whose cast text contains `name`.
///
/// Each matching catalog row counts once, so a film repeated by the merge is counted
/// once per repetition.
pub fn actor_stats(catalog: &CatalogStore, name: &str) -> Result<ActorStats, QueryError> {
    let needle = needle(name)?;
    let matches: Vec<&CatalogRow> = catalog
        .rows()
        .iter()
        .filter(|row| contains_folded(row.cast.as_deref(), &needle))
        .collect();

    if matches.is_empty() {
        return Err(QueryError::NotFound("Actor no encontrado".to_string()));
    }

    let film_count = matches.len();
    let total_return: f64 = matches.iter().map(|row| row.return_on_investment).sum();
    let average_return = if film_count > 0 {
        total_return / film_count as f64
    } else {
        0.0
    };

    Ok(ActorStats {
        actor: name.to_string(),
        film_count,
        total_return,
        average_return,
    })
}

/// Lists every row whose crew text contains `name`, with the summed return.
pub fn director_stats(catalog: &CatalogStore, name: &str) -> Result<DirectorStats, QueryError> {
    let needle = needle(name)?;
    let films: Vec<DirectorFilm> = catalog
        .rows()
        .iter()
        .filter(|row| contains_folded(row.crew.as_deref(), &needle))
        .map(|row| DirectorFilm {
            title: row.title.clone(),
            release_date: row.release_date,
            return_on_investment: row.return_on_investment,
            budget: row.budget,
            revenue: row.revenue,
        })
        .collect();

    if films.is_empty() {
        return Err(QueryError::NotFound("Director no encontrado".to_string()));
    }

    let total_return = films.iter().map(|f| f.return_on_investment).sum();
    Ok(DirectorStats {
        director: name.to_string(),
        total_return,
        films,
    })
}

fn first_title_match<'a>(catalog: &'a CatalogStore, title: &str) -> Result<&'a CatalogRow, QueryError> {
    let needle = needle(title)?;
    catalog
        .rows()
        .iter()
        .find(|row| contains_folded(Some(row.title.as_str()), &needle))
        .ok_or_else(|| QueryError::NotFound("Película no encontrada".to_string()))
}

/// Lower-cases the query as given. Surrounding spaces are part of the needle.
fn needle(query: &str) -> Result<String, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::InvalidInput(
            "El texto de búsqueda no puede estar vacío".to_string(),
        ));
    }
    Ok(query.to_lowercase())
}

fn contains_folded(haystack: Option<&str>, lowered_needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(lowered_needle))
}
