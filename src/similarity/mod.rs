//! Best-match cosine similarity against the ideal-profile vectors.

mod engine;
mod vector;

#[cfg(test)]
mod tests;

pub use engine::SimilarityEngine;
pub use vector::{SimilarityVector, best_similarity, cosine_similarity};
