//! Film Catalog Library
//!
//! Batch normalization of a film catalog and the query services answered from it.
//!
//! ## Modules
//! - **`ingestion`**: The ETL pipeline. Decodes nested fields, coerces numbers and dates,
//!   derives release year and return on investment, merges cast and crew.
//! - **`catalog`**: The read-only `CatalogStore` snapshot and its point/aggregate queries
//!   (by month, weekday, title, actor, director).
//! - **`search`**: The TF-IDF term index over synopses and cosine-similarity recommendations.
//! - **`snapshot`**: The immutable catalog + index pair shared by request handlers.
//! - **`error`**: The typed query error returned by every query operation.
//! - **`config`**: Command-line and environment configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod search;
pub mod snapshot;
