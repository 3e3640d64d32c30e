//! In-memory vector store for development and testing

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::EmbeddingVector;
use crate::domain::retrieval::{Passage, SearchParams, VectorStore};
use crate::domain::DomainError;

/// A pre-embedded chunk as exported by the indexer
#[derive(Debug, Clone, Deserialize)]
pub struct StoredPassage {
    pub id: String,
    pub chunk: String,
    pub embedding: Vec<f32>,
}

impl StoredPassage {
    pub fn new(id: impl Into<String>, chunk: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            chunk: chunk.into(),
            embedding,
        }
    }
}

/// Exact cosine scan over a read-only snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorStore {
    passages: Arc<Vec<StoredPassage>>,
}

impl InMemoryVectorStore {
    pub fn new(passages: Vec<StoredPassage>) -> Self {
        Self {
            passages: Arc::new(passages),
        }
    }

    /// Load a JSON array of `{"id", "chunk", "embedding"}` objects
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read vector snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        let passages: Vec<StoredPassage> = serde_json::from_str(&content).map_err(|e| {
            DomainError::configuration(format!(
                "Invalid vector snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            passages = passages.len(),
            "Loaded in-memory vector snapshot"
        );

        Ok(Self::new(passages))
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn store_type(&self) -> &'static str {
        "in_memory"
    }

    async fn search(
        &self,
        vector: &EmbeddingVector,
        params: SearchParams,
    ) -> Result<Vec<Passage>, DomainError> {
        // Entries with a different dimensionality are not comparable
        let mut scored: Vec<Passage> = self
            .passages
            .iter()
            .filter(|p| p.embedding.len() == vector.dimensions())
            .map(|p| Passage::new(&p.id, &p.chunk, vector.cosine_similarity(&p.embedding)))
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(params.num_candidates.min(params.limit));

        Ok(scored)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
