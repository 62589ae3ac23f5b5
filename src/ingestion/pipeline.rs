//! Batch ETL Pipeline
//!
//! Strictly sequential stages:
//! 1. **Read**: load the raw film and participant tables.
//! 2. **Sample**: keep a seeded fraction of participant rows.
//! 3. **Normalize**: drop unused columns, coerce fields, exclude rows without a date.
//! 4. **Derive**: add `release_year` and `return_on_investment`.
//! 5. **Merge**: left-join participants onto films.
//! 6. **Write**: persist the catalog snapshot.
//!
//! Nothing is written until every stage has completed.

use super::derivation::derive;
use super::normalizer::{DROPPED_COLUMNS, drop_columns, normalize_film, normalize_participants};
use super::types::{EtlReport, NormalizedFilm, Participants, RawRow};
use crate::catalog::store::CatalogStore;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EtlOptions {
    pub movies: PathBuf,
    pub credits: PathBuf,
    pub output: PathBuf,
    /// Fraction of participant rows kept, in `(0, 1]`.
    pub sample_fraction: f64,
    pub seed: u64,
}

/// Runs the whole pipeline and writes the snapshot to `options.output`.
pub fn run(options: &EtlOptions) -> Result<EtlReport> {
    anyhow::ensure!(
        options.sample_fraction > 0.0 && options.sample_fraction <= 1.0,
        "Sample fraction must be in (0, 1], got {}",
        options.sample_fraction
    );

    let mut report = EtlReport::default();

    let (movies, malformed) = read_raw_rows(&options.movies)?;
    report.malformed_records += malformed;
    let (credits, malformed) = read_raw_rows(&options.credits)?;
    report.malformed_records += malformed;

    let catalog = build_catalog(
        movies,
        credits,
        options.sample_fraction,
        options.seed,
        &mut report,
    );
    catalog.write(&options.output)?;

    tracing::info!(
        "ETL finished: {} films read, {} excluded, {} participants kept of {}, {} catalog rows",
        report.films_read,
        report.films_excluded(),
        report.participants_kept,
        report.participants_read,
        report.catalog_rows
    );
    Ok(report)
}

/// Runs every in-memory stage on already-read tables.
pub fn build_catalog(
    movies: Vec<RawRow>,
    credits: Vec<RawRow>,
    sample_fraction: f64,
    seed: u64,
    report: &mut EtlReport,
) -> CatalogStore {
    report.participants_read = credits.len();
    let credits = sample_rows(credits, sample_fraction, seed);
    report.participants_kept = credits.len();

    let participants: Vec<Participants> = credits.iter().map(normalize_participants).collect();
    let films = normalize_films(movies, report);

    let catalog = CatalogStore::merge(films, participants);
    report.catalog_rows = catalog.len();
    catalog
}

/// Normalizes and derives every film row, recording exclusions in the report.
pub fn normalize_films(rows: Vec<RawRow>, report: &mut EtlReport) -> Vec<NormalizedFilm> {
    let mut films = Vec::with_capacity(rows.len());
    for mut row in rows {
        report.films_read += 1;
        drop_columns(&mut row, &DROPPED_COLUMNS);

        match normalize_film(&row) {
            Ok(normalized) => {
                report.nested_fields_absent += normalized.parse_failures;
                films.push(derive(normalized.film));
            }
            Err(reason) => {
                tracing::trace!("Excluding film row {:?}: {:?}", row.get("id"), reason);
                report.record_exclusion(reason);
            }
        }
    }

    tracing::info!(
        "Normalized {} films ({} without release date, {} with unparseable date)",
        films.len(),
        report.excluded_missing_date,
        report.excluded_unparseable_date
    );
    films
}

/// Keeps `round(fraction * len)` rows chosen with a seeded RNG, preserving input order.
/// The same input, fraction and seed always yield the same sample.
pub fn sample_rows<T>(rows: Vec<T>, fraction: f64, seed: u64) -> Vec<T> {
    if fraction >= 1.0 {
        return rows;
    }

    let amount = ((rows.len() as f64) * fraction.max(0.0)).round() as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, rows.len(), amount);

    let mut keep = vec![false; rows.len()];
    for i in picked.into_iter() {
        keep[i] = true;
    }
    rows.into_iter()
        .zip(keep)
        .filter_map(|(row, kept)| kept.then_some(row))
        .collect()
}

/// Reads a CSV table with a header row. Records the CSV reader rejects are skipped and
/// counted.
pub fn read_raw_rows(path: &Path) -> Result<(Vec<RawRow>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .clone();

    let mut rows = Vec::new();
    let mut malformed = 0;
    for record in reader.records() {
        match record {
            Ok(record) => rows.push(RawRow::from_pairs(headers.iter().zip(record.iter()))),
            Err(e) => {
                tracing::warn!("Skipping malformed record in {}: {}", path.display(), e);
                malformed += 1;
            }
        }
    }

    tracing::info!("Read {} rows from {}", rows.len(), path.display());
    Ok((rows, malformed))
}
