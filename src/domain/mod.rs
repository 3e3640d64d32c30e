//! Domain layer - answer pipeline types, contracts and algorithms

pub mod embedding;
pub mod error;
pub mod generation;
pub mod normalizer;
pub mod pipeline;
pub mod prompt;
pub mod retrieval;

pub use embedding::{cosine_similarity, EmbeddingProvider, EmbeddingVector};
pub use error::DomainError;
pub use generation::{GenerationParams, GenerationRequest, GenerationResult, Generator};
pub use normalizer::{NormalizerStrictness, ResponseNormalizer};
pub use pipeline::{PipelineOutcome, PipelineStage, RagPipeline};
pub use prompt::PromptBuilder;
pub use retrieval::{Passage, RetrievalResult, Retriever, RetrieverConfig, SearchParams, VectorStore};
