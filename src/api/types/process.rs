//! `/process` request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::PipelineOutcome;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// The user's question. An absent field is treated as empty.
    #[serde(default)]
    pub message: String,
}

/// Every outcome, including failures, is reported through this wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub message: String,
}

impl From<&PipelineOutcome> for ProcessResponse {
    fn from(outcome: &PipelineOutcome) -> Self {
        Self {
            message: outcome.user_message().to_string(),
        }
    }
}
