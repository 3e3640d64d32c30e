//! Pipeline stages and terminal outcomes

use std::fmt;
use std::time::Duration;

use crate::domain::error::DomainError;

/// Shown when the embedding stage fails
pub const WARMING_UP_MESSAGE: &str =
    "The service is warming up. Please try again in a few seconds.";

/// Shown for every other failure; never carries diagnostic detail
pub const UNAVAILABLE_MESSAGE: &str =
    "An error occurred while processing the request. Please try again in a few seconds.";

/// Shown when retrieval finds no grounding passage
pub const NO_CONTEXT_MESSAGE: &str = "No similar chunks found.";

/// Non-terminal pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Embedding,
    Retrieving,
    Generating,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedding => "embedding",
            Self::Retrieving => "retrieving",
            Self::Generating => "generating",
        }
    }

    /// Failure tag used when the stage exceeds its time budget
    pub fn timeout_error(&self, timeout: Duration) -> DomainError {
        let message = format!("{} timed out after {}ms", self.as_str(), timeout.as_millis());

        match self {
            Self::Embedding => DomainError::embedding_unavailable(message),
            Self::Retrieving => DomainError::retrieval_failed(message),
            Self::Generating => DomainError::generation_failed(message),
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Normalized answer grounded on the top passage
    Succeeded { answer: String },
    /// Retrieval returned nothing; the generator was not called
    NoContext,
    /// A stage failed; `error` is for server-side diagnostics only
    Failed {
        stage: PipelineStage,
        error: DomainError,
    },
}

impl PipelineOutcome {
    /// Text safe to show to the end user
    pub fn user_message(&self) -> &str {
        match self {
            Self::Succeeded { answer } => answer,
            Self::NoContext => NO_CONTEXT_MESSAGE,
            Self::Failed {
                stage: PipelineStage::Embedding,
                ..
            } => WARMING_UP_MESSAGE,
            Self::Failed { .. } => UNAVAILABLE_MESSAGE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Tagged error for server-side diagnostics; `None` on success
    pub fn error(&self) -> Option<DomainError> {
        match self {
            Self::Succeeded { .. } => None,
            Self::NoContext => Some(DomainError::no_grounding_found(
                "retrieval returned no passages",
            )),
            Self::Failed { error, .. } => Some(error.clone()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded { .. } => "succeeded",
            Self::NoContext => "no_context",
            Self::Failed { .. } => "failed",
        }
    }
}
