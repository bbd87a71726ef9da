//! Deterministic text preprocessing.
//!
//! The pipeline applies, in this fixed order: lowercasing, newline-run
//! collapsing, URL stripping, removal of non-alphanumeric/non-whitespace
//! characters, whitespace-run collapsing, trimming, and whitespace
//! tokenization. It is pure: no external state, same output for the same
//! input, on documents and queries alike.
//!
//! # Examples
//!
//! ```
//! use kontos::analysis::TextPreprocessor;
//!
//! let preprocessor = TextPreprocessor::new();
//! let tokens = preprocessor.tokenize("Hello, World! https://x.co/y\nFoo");
//! assert_eq!(tokens, vec!["hello", "world", "foo"]);
//! ```

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NEWLINE_RUNS: Regex = Regex::new(r"\n+").unwrap();
    static ref URLS: Regex = Regex::new(r"[a-z][a-z0-9+.-]*://\S+").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalizes and tokenizes text for lexical indexing and querying.
#[derive(Debug, Clone, Default)]
pub struct TextPreprocessor;

impl TextPreprocessor {
    /// Create a new preprocessor.
    pub fn new() -> Self {
        TextPreprocessor
    }

    /// Normalize text without splitting it into tokens.
    pub fn normalize(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let text = NEWLINE_RUNS.replace_all(&text, " ");
        let text = URLS.replace_all(&text, "");
        let text = NON_WORD.replace_all(&text, "");
        let text = WHITESPACE_RUNS.replace_all(&text, " ");
        text.trim().to_string()
    }

    /// Normalize text and split it into tokens on whitespace.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
