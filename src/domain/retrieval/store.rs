//! Vector store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::Passage;
use crate::domain::embedding::EmbeddingVector;
use crate::domain::error::DomainError;

/// Search parameters for a nearest-neighbour query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Number of index entries considered before ranking
    pub num_candidates: usize,
    /// Maximum number of passages to return
    pub limit: usize,
}

impl SearchParams {
    pub fn new(num_candidates: usize, limit: usize) -> Self {
        Self {
            num_candidates,
            limit,
        }
    }
}

/// Read-only similarity search over a pre-built vector index.
///
/// Implementations should return passages ordered by descending similarity and
/// an empty list (not an error) when nothing matches. Transport failures
/// surface as [`DomainError::RetrievalFailed`].
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Get the store type name
    fn store_type(&self) -> &'static str;

    /// Search for the passages closest to the query vector
    async fn search(
        &self,
        vector: &EmbeddingVector,
        params: SearchParams,
    ) -> Result<Vec<Passage>, DomainError>;

    /// Check if the store is reachable
    async fn health_check(&self) -> Result<bool, DomainError>;

    /// Release connections held by the store
    async fn close(&self) {}
}
