//! BM25 index construction and querying.
//!
//! The index is built once from the preprocessed token sequences of all
//! documents and is read-only afterwards; there is no incremental update.
//! Index document count always equals the corpus length, in corpus order.

use ahash::AHashMap;
use rayon::prelude::*;

use crate::lexical::scorer::{Bm25Params, Bm25Scorer, inverse_document_frequency};

/// A term-frequency ranking structure over a tokenized corpus.
#[derive(Debug, Clone)]
pub struct Bm25Index {
    /// Per-document term frequencies, in corpus order.
    term_freqs: Vec<AHashMap<String, u32>>,
    /// Per-document token counts, in corpus order.
    doc_lengths: Vec<u32>,
    /// Average document length.
    avg_doc_length: f32,
    /// Floored IDF per term.
    idf: AHashMap<String, f32>,
    /// Scoring parameters.
    params: Bm25Params,
}

impl Bm25Index {
    /// Build an index from the tokenized corpus.
    ///
    /// Terms appearing in more than half the corpus get a negative raw IDF;
    /// those are floored to `epsilon * average raw IDF` so every term keeps
    /// a small positive weight.
    pub fn build(token_docs: &[Vec<String>], params: Bm25Params) -> Self {
        let doc_count = token_docs.len();
        let mut term_freqs = Vec::with_capacity(doc_count);
        let mut doc_lengths = Vec::with_capacity(doc_count);
        let mut doc_freqs: AHashMap<String, u32> = AHashMap::new();

        for tokens in token_docs {
            let mut tf: AHashMap<String, u32> = AHashMap::new();
            for token in tokens {
                *tf.entry(token.clone()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *doc_freqs.entry(term.clone()).or_insert(0) += 1;
            }
            doc_lengths.push(tokens.len() as u32);
            term_freqs.push(tf);
        }

        let total_tokens: u64 = doc_lengths.iter().map(|&l| l as u64).sum();
        let avg_doc_length = if doc_count > 0 {
            total_tokens as f32 / doc_count as f32
        } else {
            0.0
        };

        let mut idf: AHashMap<String, f32> = AHashMap::with_capacity(doc_freqs.len());
        let mut idf_sum = 0.0f32;
        let mut negative_terms = Vec::new();
        for (term, &df) in &doc_freqs {
            let value = inverse_document_frequency(df as usize, doc_count);
            idf_sum += value;
            if value < 0.0 {
                negative_terms.push(term.clone());
            }
            idf.insert(term.clone(), value);
        }
        if !idf.is_empty() {
            let floor = params.epsilon * (idf_sum / idf.len() as f32);
            for term in negative_terms {
                idf.insert(term, floor);
            }
        }

        Bm25Index {
            term_freqs,
            doc_lengths,
            avg_doc_length,
            idf,
            params,
        }
    }

    /// Number of documents in the index.
    pub fn doc_count(&self) -> usize {
        self.term_freqs.len()
    }

    /// Number of distinct terms in the index.
    pub fn term_count(&self) -> usize {
        self.idf.len()
    }

    /// Average document length in tokens.
    pub fn avg_doc_length(&self) -> f32 {
        self.avg_doc_length
    }

    /// Score one document against the query token multiset.
    ///
    /// Query tokens contribute once per occurrence; tokens unknown to the
    /// index contribute nothing. A document sharing no terms with the query
    /// scores 0.0 and stays rankable.
    pub fn score(&self, query_tokens: &[String], doc_index: usize) -> f32 {
        let tf = &self.term_freqs[doc_index];
        let doc_length = self.doc_lengths[doc_index] as f32;

        let mut score = 0.0;
        for token in query_tokens {
            let Some(&idf) = self.idf.get(token) else {
                continue;
            };
            let term_freq = tf.get(token).copied().unwrap_or(0) as f32;
            let scorer = Bm25Scorer::new(idf, self.avg_doc_length, &self.params);
            score += scorer.score(term_freq, doc_length);
        }
        score
    }

    /// Score every document against the query token multiset, in corpus
    /// order.
    pub fn score_all(&self, query_tokens: &[String]) -> Vec<f32> {
        (0..self.doc_count())
            .into_par_iter()
            .map(|doc_index| self.score(query_tokens, doc_index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenized(docs: &[&str]) -> Vec<Vec<String>> {
        docs.iter()
            .map(|d| d.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_build_counts_documents_and_terms() {
        let index = Bm25Index::build(
            &tokenized(&["rust memory safety", "go concurrency model"]),
            Bm25Params::default(),
        );
        assert_eq!(index.doc_count(), 2);
        assert_eq!(index.term_count(), 6);
        assert_eq!(index.avg_doc_length(), 3.0);
    }

    #[test]
    fn test_matching_document_outscores_others() {
        let index = Bm25Index::build(
            &tokenized(&[
                "rust memory safety",
                "go concurrency model",
                "python dynamic typing",
            ]),
            Bm25Params::default(),
        );

        let query: Vec<String> = vec!["memory".into(), "safety".into()];
        let scores = index.score_all(&query);
        assert_eq!(scores.len(), 3);
        assert!(scores[0] > scores[1]);
        assert!(scores[0] > scores[2]);
    }

    #[test]
    fn test_zero_overlap_scores_zero_not_dropped() {
        let index = Bm25Index::build(
            &tokenized(&["rust memory safety", "go concurrency model"]),
            Bm25Params::default(),
        );

        let scores = index.score_all(&["quantum".to_string()]);
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_repeated_query_tokens_count_repeatedly() {
        let index = Bm25Index::build(
            &tokenized(&["rust memory safety", "go concurrency model"]),
            Bm25Params::default(),
        );

        let once = index.score(&["memory".to_string()], 0);
        let twice = index.score(&["memory".to_string(), "memory".to_string()], 0);
        assert!((twice - 2.0 * once).abs() < 1e-6);
    }

    #[test]
    fn test_ubiquitous_terms_keep_positive_weight() {
        // "the" appears in every document; its raw IDF is negative and must
        // be floored rather than flipping rankings.
        let index = Bm25Index::build(
            &tokenized(&[
                "the rust borrow checker",
                "the go garbage collector",
                "the python dynamic typing",
                "the java virtual machine",
            ]),
            Bm25Params::default(),
        );

        let scores = index.score_all(&["the".to_string(), "rust".to_string()]);
        assert!(scores[0] > scores[1]);
        assert!(scores[1] > 0.0);
        assert!((scores[1] - scores[2]).abs() < 1e-6);
    }

    #[test]
    fn test_scores_are_deterministic() {
        let docs = tokenized(&["alpha beta gamma", "beta gamma delta", "gamma delta epsilon"]);
        let index = Bm25Index::build(&docs, Bm25Params::default());
        let query: Vec<String> = vec!["beta".into(), "gamma".into()];
        assert_eq!(index.score_all(&query), index.score_all(&query));
    }
}
