//! Generator trait definition

use async_trait::async_trait;

use super::{GenerationRequest, GenerationResult};

#[cfg(test)]
use mockall::automock;

/// Invokes a remote text-generation model.
///
/// Single attempt, no retries. Never returns an error: failures come back as
/// [`GenerationResult::Failed`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate text for the request
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult;

    /// Get the generator name
    fn generator_name(&self) -> &'static str;
}
