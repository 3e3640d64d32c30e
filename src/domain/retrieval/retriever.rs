//! Retriever - ranks vector store output down to the top K passages

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Passage, RetrievalResult, SearchParams, VectorStore};
use crate::domain::embedding::EmbeddingVector;
use crate::domain::error::DomainError;

/// Default number of passages returned
pub const DEFAULT_TOP_K: usize = 3;

/// Default candidate pool scanned by the index
pub const DEFAULT_NUM_CANDIDATES: usize = 20;

/// Retriever configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieverConfig {
    pub top_k: usize,
    pub num_candidates: usize,
    /// Passages scoring below this are dropped
    pub min_similarity: Option<f32>,
    /// Expected query vector dimensionality
    pub dimensions: Option<usize>,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            num_candidates: DEFAULT_NUM_CANDIDATES,
            min_similarity: None,
            dimensions: None,
        }
    }
}

/// Nearest-neighbour retrieval over a [`VectorStore`]
#[derive(Debug, Clone)]
pub struct Retriever {
    store: Arc<dyn VectorStore>,
    config: RetrieverConfig,
}

impl Retriever {
    pub fn new(store: Arc<dyn VectorStore>, config: RetrieverConfig) -> Result<Self, DomainError> {
        if config.num_candidates == 0 {
            return Err(DomainError::configuration(
                "retrieval.num_candidates must be at least 1",
            ));
        }

        if config.top_k == 0 {
            return Err(DomainError::configuration("retrieval.top_k must be at least 1"));
        }

        Ok(Self { store, config })
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }

    /// Retrieve using the configured `top_k`
    pub async fn retrieve_top(&self, vector: &EmbeddingVector) -> Result<RetrievalResult, DomainError> {
        self.retrieve(vector, self.config.top_k).await
    }

    /// Retrieve at most `k` passages ordered by non-increasing similarity.
    ///
    /// `k` is clamped to the candidate pool. An empty result is not an error.
    pub async fn retrieve(
        &self,
        vector: &EmbeddingVector,
        k: usize,
    ) -> Result<RetrievalResult, DomainError> {
        let limit = k.min(self.config.num_candidates);

        if limit == 0 {
            return Ok(RetrievalResult::empty());
        }

        if let Some(expected) = self.config.dimensions {
            if vector.dimensions() != expected {
                return Err(DomainError::retrieval_failed(format!(
                    "query vector has {} dimensions, index expects {}",
                    vector.dimensions(),
                    expected
                )));
            }
        }

        let params = SearchParams::new(self.config.num_candidates, limit);
        let passages = self.store.search(vector, params).await?;
        let fetched = passages.len();

        let ranked = rank(passages, limit, self.config.min_similarity);

        tracing::debug!(
            store = self.store.store_type(),
            num_candidates = params.num_candidates,
            limit,
            fetched,
            returned = ranked.len(),
            "Retrieved passages"
        );

        Ok(RetrievalResult::from_ranked(ranked))
    }
}

/// Drop non-finite and below-threshold scores, sort descending and truncate.
/// The sort is stable so ties keep the store's order.
fn rank(passages: Vec<Passage>, limit: usize, min_similarity: Option<f32>) -> Vec<Passage> {
    let mut ranked: Vec<Passage> = passages
        .into_iter()
        .filter(|p| p.score.is_finite())
        .filter(|p| min_similarity.is_none_or(|min| p.score >= min))
        .collect();

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);
    ranked
}
