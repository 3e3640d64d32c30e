//! Prompt builder

use crate::domain::generation::{GenerationParams, GenerationRequest};

/// Builds generation requests from the question and the top-ranked passage.
///
/// Pure and deterministic. Sampling parameters come from configuration, never
/// from the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    params: GenerationParams,
}

impl PromptBuilder {
    pub fn new(params: GenerationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Build a request grounded on a single passage
    pub fn build(&self, question: &str, passage: &str) -> GenerationRequest {
        GenerationRequest::new(question, passage, self.params)
    }
}
