//! Vector-based document retrieval.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::document::{Document, DocumentStore};
use crate::embedding::Embedder;
use crate::error::{KontosError, Result};
use crate::retriever::{Retriever, top_k_indices};
use crate::vector::{DocumentMatrix, EmbeddingCache};

/// Retrieves documents by cosine similarity over dense embeddings.
///
/// `initialize` loads the embedding matrix from the vector artifact when
/// one exists, and otherwise embeds every document through the provider and
/// persists the result. Either way it produces a new store snapshot with
/// every document's `embedding` field assigned, which later `retrieve`
/// calls hand out.
#[derive(Debug)]
pub struct VectorRetriever {
    documents: DocumentStore,
    top_k: usize,
    embedder: Arc<dyn Embedder>,
    vector_path: PathBuf,
    concurrency: usize,
    matrix: Option<DocumentMatrix>,
}

impl VectorRetriever {
    /// Create a retriever over the given store.
    ///
    /// `vector_path` is where the embedding artifact is loaded from and
    /// persisted to; by convention it is derived from the corpus file name.
    pub fn new<P: Into<PathBuf>>(
        documents: DocumentStore,
        embedder: Arc<dyn Embedder>,
        vector_path: P,
        top_k: usize,
    ) -> Self {
        VectorRetriever {
            documents,
            top_k,
            embedder,
            vector_path: vector_path.into(),
            concurrency: 1,
            matrix: None,
        }
    }

    /// Embed up to `concurrency` documents at a time during `initialize`.
    ///
    /// Completion order never affects row order: row i always holds
    /// document i's vector.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The current store snapshot. After a successful `initialize` every
    /// document carries its embedding.
    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// The embedding matrix, if initialized.
    pub fn matrix(&self) -> Option<&DocumentMatrix> {
        self.matrix.as_ref()
    }

    async fn embed_corpus(&self) -> Result<DocumentMatrix> {
        let embedder = Arc::clone(&self.embedder);
        let contents: Vec<String> =
            self.documents.iter().map(|doc| doc.content.clone()).collect();
        let requests = contents.into_iter().map(|content| {
            let embedder = Arc::clone(&embedder);
            async move { embedder.embed(&content).await }
        });

        let rows: Vec<Vec<f32>> = stream::iter(requests)
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        DocumentMatrix::from_rows(rows)
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn initialize(&mut self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(KontosError::empty_corpus(
                "no documents loaded, load data first",
            ));
        }

        let cache = EmbeddingCache::new(&self.vector_path);
        let matrix = if cache.exists() {
            let matrix = cache.load()?;
            if matrix.row_count() != self.documents.len() {
                return Err(KontosError::CacheCorpusMismatch {
                    expected: self.documents.len(),
                    found: matrix.row_count(),
                });
            }
            log::info!(
                "loaded {} document vectors from {}",
                matrix.row_count(),
                self.vector_path.display()
            );
            matrix
        } else {
            log::info!(
                "embedding {} documents via {}",
                self.documents.len(),
                self.embedder.name()
            );
            let matrix = self.embed_corpus().await?;
            cache.store(&matrix)?;
            matrix
        };

        self.documents = self.documents.with_embeddings(matrix.rows())?;
        self.matrix = Some(matrix);
        Ok(())
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        let matrix = self
            .matrix
            .as_ref()
            .ok_or_else(|| KontosError::not_initialized("vector index not initialized"))?;

        let query_vector = self.embedder.embed(query).await?;
        let similarities = matrix.similarities(&query_vector)?;

        Ok(top_k_indices(&similarities, self.top_k)
            .into_iter()
            .map(|i| self.documents.documents()[i].clone())
            .collect())
    }

    fn top_k(&self) -> usize {
        self.top_k
    }
}
