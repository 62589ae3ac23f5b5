//! Loaded Snapshot
//!
//! The catalog and its term vector index, built once at startup and shared read-only
//! (`Arc<Snapshot>`) by every request handler. Replacing the data means restarting the
//! process with a new snapshot file.

use crate::catalog::store::CatalogStore;
use crate::search::vectorizer::TermIndex;

use anyhow::Result;
use std::path::Path;

#[derive(Debug)]
pub struct Snapshot {
    pub catalog: CatalogStore,
    pub index: TermIndex,
}

impl Snapshot {
    /// Builds the term index from the catalog's overviews, in catalog row order.
    pub fn new(catalog: CatalogStore) -> Self {
        let index = TermIndex::build(catalog.rows().iter().map(|row| row.overview.as_str()));
        Self { catalog, index }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let catalog = CatalogStore::load(path)?;
        Ok(Self::new(catalog))
    }
}
