//! Vector store implementations

mod in_memory;
mod pgvector;

pub use in_memory::{InMemoryVectorStore, StoredPassage};
pub use pgvector::{PgvectorConfig, PgvectorStore};
