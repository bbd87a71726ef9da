//! Document embedding matrix and cosine similarity.
//!
//! One row per document, same order as the document store, all rows the
//! same dimension. The invariant `row_count == corpus length` is enforced
//! where the matrix meets the store, not here.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{KontosError, Result};

/// Cosine similarity between two equal-length vectors.
///
/// `dot(a, b) / (‖a‖ · ‖b‖)`. A zero-norm vector on either side yields
/// 0.0 rather than an undefined ratio, so no NaN reaches ranking.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

/// A dense 2-D matrix of document embeddings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMatrix {
    rows: Vec<Vec<f32>>,
    dimension: usize,
}

impl DocumentMatrix {
    /// Create a matrix from embedding rows.
    ///
    /// All rows must share one dimension.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(row) = rows.iter().find(|row| row.len() != dimension) {
            return Err(KontosError::invalid_operation(format!(
                "embedding dimension mismatch: expected {dimension}, got {}",
                row.len()
            )));
        }

        Ok(DocumentMatrix { rows, dimension })
    }

    /// Number of rows (documents).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Dimension of every row.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The embedding rows, in corpus order.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Get one row by corpus index.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cosine similarity of the query against every row, in corpus order.
    ///
    /// Fails if the query dimension does not match the matrix dimension.
    pub fn similarities(&self, query: &[f32]) -> Result<Vec<f32>> {
        if query.len() != self.dimension {
            return Err(KontosError::invalid_operation(format!(
                "query dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        Ok(self
            .rows
            .par_iter()
            .map(|row| cosine_similarity(row, query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_known_values() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_norm_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = DocumentMatrix::from_rows(vec![vec![1.0, 0.0], vec![1.0]]);
        assert!(matches!(result, Err(KontosError::InvalidOperation(_))));
    }

    #[test]
    fn test_similarities_orders_by_closeness() {
        let matrix = DocumentMatrix::from_rows(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.9, 0.1],
        ])
        .unwrap();

        let sims = matrix.similarities(&[1.0, 0.0]).unwrap();
        assert!(sims[0] > sims[2]);
        assert!(sims[2] > sims[1]);
    }

    #[test]
    fn test_similarities_rejects_dimension_mismatch() {
        let matrix = DocumentMatrix::from_rows(vec![vec![1.0, 0.0]]).unwrap();
        let result = matrix.similarities(&[1.0, 0.0, 0.0]);
        assert!(matches!(result, Err(KontosError::InvalidOperation(_))));
    }
}
