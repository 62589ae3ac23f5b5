//! Catalog Module
//!
//! The merged film table and the point/aggregate queries answered from it.
//!
//! ## Submodules
//! - **`store`**: The read-only `CatalogStore`: participant merge, snapshot read/write.
//! - **`query`**: Counts by month and weekday, title lookups, actor and director statistics.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: The snapshot row schema and response payloads.

pub mod handlers;
pub mod query;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;
