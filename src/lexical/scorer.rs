//! BM25 scoring math.

/// Parameters for the BM25 ranking function (Okapi variant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation parameter.
    pub k1: f32,
    /// Document-length normalization parameter.
    pub b: f32,
    /// Floor factor for negative IDF values, as a fraction of the corpus
    /// average IDF.
    pub epsilon: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

/// Raw inverse document frequency of a term.
///
/// `IDF = ln((N - df + 0.5) / (df + 0.5))`. Negative for terms appearing in
/// more than half the corpus; the index floors those afterwards.
pub fn inverse_document_frequency(doc_freq: usize, total_docs: usize) -> f32 {
    if doc_freq == 0 || total_docs == 0 {
        return 0.0;
    }

    let n = total_docs as f32;
    let df = doc_freq as f32;
    ((n - df + 0.5) / (df + 0.5)).ln()
}

/// Per-term BM25 scorer.
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    /// IDF of the term (already floored by the index).
    idf: f32,
    /// Average document length across the corpus.
    avg_doc_length: f32,
    /// BM25 k1 parameter.
    k1: f32,
    /// BM25 b parameter.
    b: f32,
}

impl Bm25Scorer {
    /// Create a new scorer for one term.
    pub fn new(idf: f32, avg_doc_length: f32, params: &Bm25Params) -> Self {
        Bm25Scorer {
            idf,
            avg_doc_length,
            k1: params.k1,
            b: params.b,
        }
    }

    /// Get the IDF this scorer was built with.
    pub fn idf(&self) -> f32 {
        self.idf
    }

    /// Score one document for this term.
    ///
    /// `score = IDF * (tf * (k1 + 1)) / (tf + k1 * (1 - b + b * dl / avgdl))`
    pub fn score(&self, term_freq: f32, doc_length: f32) -> f32 {
        if term_freq == 0.0 {
            return 0.0;
        }

        let norm_factor = 1.0 - self.b + self.b * (doc_length / self.avg_doc_length);
        self.idf * (term_freq * (self.k1 + 1.0)) / (term_freq + self.k1 * norm_factor)
    }
}
