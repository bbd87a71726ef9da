//! Unified embedder trait for vector retrieval.
//!
//! An `Embedder` turns text into a fixed-length dense vector. Document
//! embedding during index initialization and query embedding during
//! retrieval go through the same trait, so the two are always comparable.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for components that produce dense embeddings from text.
///
/// Implementations must be `Send + Sync`; retrievers hold them behind an
/// `Arc<dyn Embedder>` and may issue concurrent calls during the
/// initialization pass.
#[async_trait]
pub trait Embedder: Send + Sync + Debug {
    /// Embed the given text into a dense vector.
    ///
    /// Failures (network, quota, malformed responses) surface as
    /// [`crate::error::KontosError::Provider`] and are never retried here.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the name of this embedder.
    fn name(&self) -> &'static str;
}
