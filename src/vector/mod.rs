//! Dense-vector ranking and the on-disk embedding artifact.

pub mod cache;
pub mod matrix;

pub use cache::EmbeddingCache;
pub use matrix::{DocumentMatrix, cosine_similarity};
