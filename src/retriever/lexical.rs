//! BM25-based document retrieval.

use async_trait::async_trait;

use crate::analysis::TextPreprocessor;
use crate::document::{Document, DocumentStore};
use crate::error::{KontosError, Result};
use crate::lexical::{Bm25Index, Bm25Params};
use crate::retriever::{Retriever, top_k_indices};

/// Retrieves documents by BM25 term-overlap ranking.
///
/// # Examples
///
/// ```
/// use kontos::document::{Document, DocumentStore};
/// use kontos::retriever::{LexicalRetriever, Retriever};
///
/// # async fn example() -> kontos::error::Result<()> {
/// let store = DocumentStore::new(vec![
///     Document::new("a", "rust memory safety"),
///     Document::new("b", "go concurrency model"),
/// ]);
///
/// let mut retriever = LexicalRetriever::new(store, 1);
/// retriever.initialize().await?;
/// let hits = retriever.retrieve("memory safety").await?;
/// assert_eq!(hits[0].id, "a");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LexicalRetriever {
    documents: DocumentStore,
    top_k: usize,
    preprocessor: TextPreprocessor,
    params: Bm25Params,
    index: Option<Bm25Index>,
}

impl LexicalRetriever {
    /// Create a retriever over the given store.
    pub fn new(documents: DocumentStore, top_k: usize) -> Self {
        LexicalRetriever {
            documents,
            top_k,
            preprocessor: TextPreprocessor::new(),
            params: Bm25Params::default(),
            index: None,
        }
    }

    /// Override the BM25 parameters before `initialize`.
    pub fn with_params(mut self, params: Bm25Params) -> Self {
        self.params = params;
        self
    }

    /// The document store this retriever ranks over.
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }
}

#[async_trait]
impl Retriever for LexicalRetriever {
    async fn initialize(&mut self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(KontosError::empty_corpus(
                "no documents loaded, load data first",
            ));
        }

        let tokenized: Vec<Vec<String>> = self
            .documents
            .iter()
            .map(|doc| self.preprocessor.tokenize(&doc.content))
            .collect();

        self.index = Some(Bm25Index::build(&tokenized, self.params));
        log::info!(
            "BM25 index initialized over {} documents",
            self.documents.len()
        );
        Ok(())
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| KontosError::not_initialized("BM25 index not initialized"))?;

        let query_tokens = self.preprocessor.tokenize(query);
        let scores = index.score_all(&query_tokens);

        Ok(top_k_indices(&scores, self.top_k)
            .into_iter()
            .map(|i| self.documents.documents()[i].clone())
            .collect())
    }

    fn top_k(&self) -> usize {
        self.top_k
    }
}
