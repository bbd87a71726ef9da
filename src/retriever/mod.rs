//! The polymorphic retrieval contract.
//!
//! Exactly two strategies implement [`Retriever`]: the BM25-backed
//! [`lexical::LexicalRetriever`] and the cosine-similarity-backed
//! [`vector::VectorRetriever`]. The calling pipeline constructs one of the
//! two over a shared [`crate::document::DocumentStore`], awaits
//! `initialize` once, then issues any number of `retrieve` calls.

pub mod lexical;
pub mod vector;

use async_trait::async_trait;

pub use lexical::LexicalRetriever;
pub use vector::VectorRetriever;

use crate::document::Document;
use crate::error::Result;

/// Default number of documents returned per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Trait for document retrieval strategies.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Build (or load) the strategy-specific index. One-shot; callers must
    /// not run `initialize` concurrently with `retrieve`.
    async fn initialize(&mut self) -> Result<()>;

    /// Retrieve up to `min(top_k, document_count)` documents for the query,
    /// ordered by descending relevance. Equal scores are broken by
    /// ascending corpus index, so results are stable across calls.
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>>;

    /// Maximum number of documents a `retrieve` call may return.
    fn top_k(&self) -> usize;
}

/// Select the indices of the `k` highest scores, descending, ties broken by
/// ascending index.
pub fn top_k_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });
    order.truncate(k.min(scores.len()));
    order
}
