//! On-disk cache for the document embedding matrix.
//!
//! The artifact is a bincode-serialized [`DocumentMatrix`], one row per
//! document in store order, written once after the first embedding pass and
//! reloaded on later runs. The format is unversioned; callers delete or
//! rename the artifact when the corpus changes shape, and the retriever
//! rejects a row-count mismatch at load time.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{KontosError, Result};
use crate::vector::matrix::DocumentMatrix;

/// Persists and reloads per-document embedding vectors.
#[derive(Debug, Clone)]
pub struct EmbeddingCache {
    path: PathBuf,
}

impl EmbeddingCache {
    /// Create a cache handle for the given artifact path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        EmbeddingCache { path: path.into() }
    }

    /// The artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether an artifact exists at the cache path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the matrix from the artifact.
    pub fn load(&self) -> Result<DocumentMatrix> {
        let file = File::open(&self.path)?;
        let matrix: DocumentMatrix =
            bincode::deserialize_from(BufReader::new(file)).map_err(|e| {
                KontosError::serialization(format!(
                    "failed to read vector artifact {}: {e}",
                    self.path.display()
                ))
            })?;
        log::debug!(
            "loaded {} vectors (dimension {}) from {}",
            matrix.row_count(),
            matrix.dimension(),
            self.path.display()
        );
        Ok(matrix)
    }

    /// Persist the matrix to the artifact path, creating parent directories
    /// as needed.
    pub fn store(&self, matrix: &DocumentMatrix) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        bincode::serialize_into(BufWriter::new(file), matrix).map_err(|e| {
            KontosError::serialization(format!(
                "failed to write vector artifact {}: {e}",
                self.path.display()
            ))
        })?;
        log::info!(
            "saved {} vectors to {}",
            matrix.row_count(),
            self.path.display()
        );
        Ok(())
    }
}
