//! Generation request types

use serde::{Deserialize, Serialize};

/// Sampling temperature sent with every request
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Maximum output length sent with every request
pub const DEFAULT_MAX_TOKENS: u32 = 250;

/// Fixed sampling hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// A grounded generation request: the user's question plus one context passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    question: String,
    context: String,
    temperature: f32,
    max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(
        question: impl Into<String>,
        context: impl Into<String>,
        params: GenerationParams,
    ) -> Self {
        Self {
            question: question.into(),
            context: context.into(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}
