//! Catalog Store
//!
//! The merged, read-only film table. It is built once by the ETL (`merge`), written as
//! a CSV snapshot, and reloaded wholesale by the query service. Row order is part of
//! the contract: "first match" queries and the term vector index both address rows by
//! position.

use super::types::CatalogRow;
use crate::ingestion::types::{NormalizedFilm, Participants};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    rows: Vec<CatalogRow>,
}

impl CatalogStore {
    pub fn from_rows(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    /// Left outer join of films against participants on `id`.
    ///
    /// Every film is kept in input order. A film without an identifier, or without a
    /// matching participant row, gets empty cast and crew. A film whose identifier
    /// appears in several participant rows is emitted once per match, in participant
    /// order.
    pub fn merge(films: Vec<NormalizedFilm>, participants: Vec<Participants>) -> Self {
        let mut by_id: HashMap<i64, Vec<Participants>> = HashMap::new();
        for p in participants {
            if let Some(id) = p.id {
                by_id.entry(id).or_default().push(p);
            }
        }

        let mut rows = Vec::with_capacity(films.len());
        for film in films {
            match film.id.and_then(|id| by_id.get(&id)) {
                Some(matches) => {
                    for p in matches {
                        rows.push(to_row(film.clone(), p.cast.clone(), p.crew.clone()));
                    }
                }
                None => rows.push(to_row(film, None, None)),
            }
        }

        Self { rows }
    }

    /// Loads a snapshot written by [`CatalogStore::write`]. Any malformed row fails the load.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open snapshot {}", path.display()))?;

        let mut rows = Vec::new();
        for (line, record) in reader.deserialize::<CatalogRow>().enumerate() {
            let row = record.with_context(|| {
                format!("Malformed snapshot row {} in {}", line + 1, path.display())
            })?;
            rows.push(row);
        }

        tracing::info!("Loaded {} catalog rows from {}", rows.len(), path.display());
        Ok(Self { rows })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create snapshot {}", path.display()))?;
        for row in &self.rows {
            writer
                .serialize(row)
                .with_context(|| format!("Failed to write row for {:?}", row.title))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush snapshot {}", path.display()))?;

        tracing::info!("Wrote {} catalog rows to {}", self.rows.len(), path.display());
        Ok(())
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn get(&self, position: usize) -> Option<&CatalogRow> {
        self.rows.get(position)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn to_row(film: NormalizedFilm, cast: Option<String>, crew: Option<String>) -> CatalogRow {
    CatalogRow {
        id: film.id,
        title: film.title,
        overview: film.overview,
        release_date: film.release_date,
        release_year: film.release_year,
        budget: film.budget,
        revenue: film.revenue,
        return_on_investment: film.return_on_investment,
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
        cast,
        crew,
    }
}
