//! # Kontos
//!
//! A retrieval core for RAG pipelines in Rust.
//!
//! ## Features
//!
//! - Lexical ranking with BM25 over a preprocessed token corpus
//! - Semantic ranking with dense-vector cosine similarity
//! - One polymorphic [`retriever::Retriever`] contract over both strategies
//! - On-disk caching of computed document embeddings
//! - Pluggable embedding providers (OpenAI API, precomputed tables)

pub mod analysis;
pub mod cli;
pub mod document;
pub mod embedding;
pub mod error;
pub mod lexical;
pub mod retriever;
pub mod vector;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
