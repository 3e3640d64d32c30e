//! Generation result

use crate::domain::error::DomainError;

/// Outcome of a single generation attempt.
///
/// Failures are values, not errors: the generator converts every transport or
/// upstream problem into [`GenerationResult::Failed`] at its boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// Raw generated text
    Generated(String),
    /// Tagged failure carrying the diagnostic
    Failed(DomainError),
}

impl GenerationResult {
    pub fn generated(text: impl Into<String>) -> Self {
        Self::Generated(text.into())
    }

    pub fn failed(error: DomainError) -> Self {
        Self::Failed(error)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Generated(text) => Some(text),
            Self::Failed(_) => None,
        }
    }
}

impl From<Result<String, DomainError>> for GenerationResult {
    fn from(result: Result<String, DomainError>) -> Self {
        match result {
            Ok(text) => Self::Generated(text),
            Err(error) => Self::Failed(error),
        }
    }
}
