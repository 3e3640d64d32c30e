//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::EmbeddingVector;
use crate::domain::DomainError;

/// Converts text into an embedding vector.
///
/// Implementations make at most one upstream attempt per call. Transport
/// failures and non-success statuses surface as
/// [`DomainError::EmbeddingUnavailable`], unexpected payloads as
/// [`DomainError::MalformedUpstreamResponse`].
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed a single text (the empty string included)
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
