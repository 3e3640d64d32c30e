//! Passage and retrieval result types

use serde::{Deserialize, Serialize};

/// An indexed chunk of corpus text returned by a similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Opaque document id assigned by the indexer
    pub id: String,
    /// Chunk text
    pub chunk: String,
    /// Similarity to the query vector (higher is closer)
    pub score: f32,
}

impl Passage {
    pub fn new(id: impl Into<String>, chunk: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            chunk: chunk.into(),
            score,
        }
    }
}

/// Passages ranked by descending similarity; index 0 is the closest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalResult {
    passages: Vec<Passage>,
}

impl RetrievalResult {
    /// Build a result from passages already ranked by the retriever
    pub(crate) fn from_ranked(passages: Vec<Passage>) -> Self {
        Self { passages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The most similar passage, if any
    pub fn top(&self) -> Option<&Passage> {
        self.passages.first()
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}
