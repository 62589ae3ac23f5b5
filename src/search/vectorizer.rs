//! Term Vector Index
//!
//! One sparse TF-IDF vector per catalog row, addressed by row position. Weights are
//! raw term counts scaled by the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalized so the cosine
//! similarity of two vectors is their dot product. A document with no vocabulary terms
//! keeps its position with an empty (zero) vector.

use super::tokenizer::term_counts;
use std::collections::{BTreeSet, HashMap};

/// Sparse vector with entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Builds a vector from unsorted `(term, weight)` pairs; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.retain(|(_, w)| *w != 0.0);
        entries.sort_by_key(|(term, _)| *term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= norm;
            }
        }
        self
    }
}

/// Cosine of the angle between two vectors; `0.0` when either is a zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl TermIndex {
    /// Builds the index over `documents` in order. Vector `i` belongs to document `i`.
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let counts: Vec<HashMap<String, usize>> =
            documents.into_iter().map(term_counts).collect();

        // Term ids follow lexical order so the index does not depend on hash order.
        let terms: BTreeSet<&str> = counts
            .iter()
            .flat_map(|doc| doc.keys().map(String::as_str))
            .collect();
        let vocabulary: HashMap<String, u32> = terms
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id as u32))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in &counts {
            for term in doc.keys() {
                document_frequency[vocabulary[term] as usize] += 1;
            }
        }

        let n = counts.len() as f32;
        let idf: Vec<f32> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let vectors = counts
            .iter()
            .map(|doc| {
                let entries = doc
                    .iter()
                    .map(|(term, &count)| {
                        let id = vocabulary[term];
                        (id, count as f32 * idf[id as usize])
                    })
                    .collect();
                SparseVector::from_entries(entries).normalized()
            })
            .collect();

        tracing::info!(
            "Built term index: {} documents, {} terms",
            counts.len(),
            vocabulary.len()
        );

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    pub fn vector(&self, position: usize) -> Option<&SparseVector> {
        self.vectors.get(position)
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_id(term).map(|id| self.idf[id as usize])
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
