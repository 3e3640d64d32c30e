//! Embedding provider implementations

mod inference_endpoint;

pub use inference_endpoint::InferenceEmbeddingProvider;
