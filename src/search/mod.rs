//! Similarity Search Module
//!
//! Content-based recommendations over film synopses.
//!
//! ## Responsibilities
//! - **Tokenization**: Turning synopsis text into lower-cased terms, stop words removed.
//! - **Indexing**: One TF-IDF vector per catalog row, aligned with the catalog's row order.
//! - **Ranking**: Cosine similarity of one film against every other film.
//! - **API**: Exposing recommendations via an HTTP endpoint.
//!
//! ## Submodules
//! - **`engine`**: Similarity ranking and the recommendation query.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`stopwords`**: The English stop-word list.
//! - **`tokenizer`**: Text processing utilities.
//! - **`types`**: Response payloads.
//! - **`vectorizer`**: Sparse vectors and the TF-IDF term index.

pub mod engine;
pub mod handlers;
pub mod stopwords;
pub mod tokenizer;
pub mod types;
pub mod vectorizer;
