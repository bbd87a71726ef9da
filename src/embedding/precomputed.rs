//! Embedder backed by a fixed table of pre-computed vectors.
//!
//! Useful when vectors were computed offline, and in tests, where it stands
//! in for the network provider. Any text absent from the table is a
//! provider error, so a misconfigured table fails loudly instead of
//! degrading rankings.

use ahash::AHashMap;

use async_trait::async_trait;

use crate::embedding::embedder::Embedder;
use crate::error::{KontosError, Result};

/// An embedder that looks vectors up in a fixed text-to-vector table.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedEmbedder {
    vectors: AHashMap<String, Vec<f32>>,
}

impl PrecomputedEmbedder {
    /// Create an empty table.
    pub fn new() -> Self {
        PrecomputedEmbedder {
            vectors: AHashMap::new(),
        }
    }

    /// Add a vector for the given text.
    pub fn with_vector<S: Into<String>>(mut self, text: S, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[async_trait]
impl Embedder for PrecomputedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| KontosError::provider(format!("no precomputed vector for {text:?}")))
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}
