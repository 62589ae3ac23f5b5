//! Ingestion Module
//!
//! Turns the raw film and participant tables into the catalog snapshot.
//!
//! ## Workflow
//! 1. **Decode**: `literal` parses serialized nested structures without evaluating them.
//! 2. **Normalize**: `normalizer` coerces numbers, ids and dates; rows without a valid
//!    release date are excluded, every other field falls back to a default.
//! 3. **Derive**: `derivation` adds `release_year` and `return_on_investment`.
//! 4. **Run**: `pipeline` samples participants, merges and writes the snapshot.

pub mod derivation;
pub mod literal;
pub mod normalizer;
pub mod pipeline;
pub mod types;
