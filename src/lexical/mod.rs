//! Lexical (term-frequency) ranking.
//!
//! [`index::Bm25Index`] is built once from the tokenized corpus and scores
//! queries with the BM25 ranking function implemented in [`scorer`].

pub mod index;
pub mod scorer;

pub use index::Bm25Index;
pub use scorer::{Bm25Params, Bm25Scorer};
