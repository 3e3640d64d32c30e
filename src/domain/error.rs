use thiserror::Error;

/// Core domain errors
///
/// Every failure of an external collaborator is converted into one of these
/// tags at the component that made the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("Embedding unavailable: {message}")]
    EmbeddingUnavailable { message: String },

    #[error("No grounding found: {message}")]
    NoGroundingFound { message: String },

    #[error("Retrieval failed: {message}")]
    RetrievalFailed { message: String },

    #[error("Generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("Malformed upstream response from {upstream}: {message}")]
    MalformedUpstreamResponse { upstream: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn embedding_unavailable(message: impl Into<String>) -> Self {
        Self::EmbeddingUnavailable {
            message: message.into(),
        }
    }

    pub fn no_grounding_found(message: impl Into<String>) -> Self {
        Self::NoGroundingFound {
            message: message.into(),
        }
    }

    pub fn retrieval_failed(message: impl Into<String>) -> Self {
        Self::RetrievalFailed {
            message: message.into(),
        }
    }

    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }

    pub fn malformed_upstream(upstream: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedUpstreamResponse {
            upstream: upstream.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Short tag used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmbeddingUnavailable { .. } => "embedding_unavailable",
            Self::NoGroundingFound { .. } => "no_grounding_found",
            Self::RetrievalFailed { .. } => "retrieval_failed",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::MalformedUpstreamResponse { .. } => "malformed_upstream_response",
            Self::Configuration { .. } => "configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_unavailable_error() {
        let error = DomainError::embedding_unavailable("HTTP 503");
        assert_eq!(error.to_string(), "Embedding unavailable: HTTP 503");
        assert_eq!(error.kind(), "embedding_unavailable");
    }

    #[test]
    fn test_malformed_upstream_error() {
        let error = DomainError::malformed_upstream("embedding", "missing field `embeddings`");
        assert_eq!(
            error.to_string(),
            "Malformed upstream response from embedding: missing field `embeddings`"
        );
    }

    #[test]
    fn test_generation_failed_error() {
        let error = DomainError::generation_failed("connection reset");
        assert_eq!(error.to_string(), "Generation failed: connection reset");
        assert_eq!(error.kind(), "generation_failed");
    }
}
