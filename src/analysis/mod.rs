//! Text analysis for lexical retrieval.
//!
//! Index tokens and query tokens must come from the exact same pipeline to
//! be comparable, so the whole pipeline lives behind one type,
//! [`preprocess::TextPreprocessor`].

pub mod preprocess;

pub use preprocess::TextPreprocessor;
