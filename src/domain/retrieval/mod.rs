//! Retrieval domain - passages, vector store contract and the retriever

mod passage;
mod retriever;
mod store;

pub use passage::{Passage, RetrievalResult};
pub use retriever::{Retriever, RetrieverConfig, DEFAULT_NUM_CANDIDATES, DEFAULT_TOP_K};
pub use store::{SearchParams, VectorStore};

#[cfg(test)]
pub use store::mock::MockVectorStore;
