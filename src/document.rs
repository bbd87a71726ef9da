//! Document records and the shared document store.
//!
//! A [`Document`] is an immutable corpus record; only its `embedding` field
//! is assigned, exactly once, when a vector index is initialized. The
//! [`DocumentStore`] is a cheaply clonable, ordered snapshot of the corpus
//! shared by whichever retriever is constructed over it. Embedding
//! assignment produces a *new* snapshot rather than mutating documents in
//! place, so earlier snapshots stay valid.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{KontosError, Result};

/// A single corpus record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique, stable identifier.
    pub id: String,
    /// Text content; the only field that participates in ranking.
    pub content: String,
    /// Optional source URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Optional publication date, kept as an opaque string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Dense vector assigned during vector-index initialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    /// Create a new document with the given id and content.
    pub fn new<S: Into<String>, T: Into<String>>(id: S, content: T) -> Self {
        Document {
            id: id.into(),
            content: content.into(),
            url: None,
            date: None,
            embedding: None,
        }
    }

    /// Set the source URL.
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the publication date.
    pub fn with_date<S: Into<String>>(mut self, date: S) -> Self {
        self.date = Some(date.into());
        self
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.content)?;
        if let Some(date) = &self.date {
            write!(f, " (posted: {date})")?;
        }
        Ok(())
    }
}

/// On-disk shape of one corpus entry, keyed by document id in the file.
#[derive(Debug, Deserialize)]
struct CorpusEntry {
    #[serde(default)]
    content: String,
    url: Option<String>,
    date: Option<String>,
}

/// An ordered, shared, read-mostly collection of documents.
///
/// Cloning a store clones an `Arc`, not the documents. The store never
/// deletes or reorders documents; [`DocumentStore::with_embeddings`] is the
/// only sanctioned mutation point and it returns a fresh snapshot.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Arc<Vec<Document>>,
}

impl DocumentStore {
    /// Create a store from an ordered document sequence.
    pub fn new(documents: Vec<Document>) -> Self {
        DocumentStore {
            documents: Arc::new(documents),
        }
    }

    /// Load a corpus from a JSON file of the form
    /// `{"<id>": {"content": ..., "url": ..., "date": ...}, ...}`.
    ///
    /// Entries are taken in ascending id order so corpus order (and with it
    /// tie-breaking during retrieval) is deterministic across runs.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            KontosError::Io(std::io::Error::new(
                e.kind(),
                format!("corpus file {}: {e}", path.display()),
            ))
        })?;
        let entries: BTreeMap<String, CorpusEntry> = serde_json::from_reader(BufReader::new(file))?;

        let documents = entries
            .into_iter()
            .map(|(id, entry)| Document {
                id,
                content: entry.content,
                url: entry.url,
                date: entry.date,
                embedding: None,
            })
            .collect::<Vec<_>>();

        log::info!("loaded {} documents", documents.len());
        Ok(DocumentStore::new(documents))
    }

    /// Number of documents in the store.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Get the document at the given corpus index.
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    /// The documents in corpus order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Iterate over the documents in corpus order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Produce a new snapshot with one embedding row assigned per document.
    ///
    /// Row i is assigned to document i. Fails if the row count does not
    /// match the store length.
    pub fn with_embeddings(&self, rows: &[Vec<f32>]) -> Result<Self> {
        if rows.len() != self.documents.len() {
            return Err(KontosError::CacheCorpusMismatch {
                expected: self.documents.len(),
                found: rows.len(),
            });
        }

        let documents = self
            .documents
            .iter()
            .zip(rows)
            .map(|(doc, row)| {
                let mut doc = doc.clone();
                doc.embedding = Some(row.clone());
                doc
            })
            .collect();

        Ok(DocumentStore::new(documents))
    }
}

impl From<Vec<Document>> for DocumentStore {
    fn from(documents: Vec<Document>) -> Self {
        DocumentStore::new(documents)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_document_display() {
        let doc = Document::new("post-1", "hello world").with_date("2024-01-01");
        assert_eq!(doc.to_string(), "post-1: hello world (posted: 2024-01-01)");

        let doc = Document::new("post-2", "no date");
        assert_eq!(doc.to_string(), "post-2: no date");
    }

    #[test]
    fn test_store_snapshot_with_embeddings() {
        let store = DocumentStore::new(vec![
            Document::new("a", "first"),
            Document::new("b", "second"),
        ]);

        let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let snapshot = store.with_embeddings(&rows).unwrap();

        assert_eq!(snapshot.get(0).unwrap().embedding, Some(vec![1.0, 0.0]));
        assert_eq!(snapshot.get(1).unwrap().embedding, Some(vec![0.0, 1.0]));
        // The original snapshot is untouched.
        assert_eq!(store.get(0).unwrap().embedding, None);
    }

    #[test]
    fn test_store_snapshot_row_count_mismatch() {
        let store = DocumentStore::new(vec![Document::new("a", "first")]);
        let result = store.with_embeddings(&[vec![1.0], vec![2.0]]);
        assert!(matches!(
            result,
            Err(crate::error::KontosError::CacheCorpusMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_load_json_sorted_by_id() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "b": {{"content": "second", "url": "https://example.com/b"}},
                "a": {{"content": "first", "date": "2024-05-01"}}
            }}"#
        )
        .unwrap();

        let store = DocumentStore::load_json(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().id, "a");
        assert_eq!(store.get(0).unwrap().date.as_deref(), Some("2024-05-01"));
        assert_eq!(store.get(1).unwrap().id, "b");
        assert_eq!(
            store.get(1).unwrap().url.as_deref(),
            Some("https://example.com/b")
        );
    }

    #[test]
    fn test_load_json_missing_file() {
        let result = DocumentStore::load_json("/nonexistent/corpus.json");
        assert!(matches!(result, Err(KontosError::Io(_))));
    }
}
