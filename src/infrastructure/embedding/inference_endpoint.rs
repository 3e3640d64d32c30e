//! Hosted inference endpoint embedding provider
//!
//! Request: `{"inputs": <text>, "parameters": {}}` with bearer auth.
//! Response: a JSON object whose `embeddings` field is a vector, or a batch of
//! vectors of which the first is used.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingVector};
use crate::domain::DomainError;
use crate::infrastructure::http::{HttpClientTrait, HttpError};

const PROVIDER_NAME: &str = "inference-embedding";

/// Embedding provider backed by a hosted inference endpoint
#[derive(Debug)]
pub struct InferenceEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    url: String,
    auth_header: String,
}

impl<C: HttpClientTrait> InferenceEmbeddingProvider<C> {
    pub fn new(client: C, url: impl Into<String>, api_key: impl AsRef<str>) -> Self {
        Self {
            client,
            url: url.into(),
            auth_header: format!("Bearer {}", api_key.as_ref()),
        }
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Accept", "application/json"),
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(text: &str) -> serde_json::Value {
        json!({
            "inputs": text,
            "parameters": {},
        })
    }

    fn parse_response(json: serde_json::Value) -> Result<EmbeddingVector, DomainError> {
        let response: EndpointEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::malformed_upstream(
                PROVIDER_NAME,
                format!("Failed to parse embedding response: {}", e),
            )
        })?;

        let values = match response.embeddings {
            EmbeddingsField::Single(values) => values,
            EmbeddingsField::Batch(batch) => batch.into_iter().next().unwrap_or_default(),
        };

        if values.is_empty() {
            return Err(DomainError::malformed_upstream(
                PROVIDER_NAME,
                "embedding vector is empty",
            ));
        }

        Ok(EmbeddingVector::new(values))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for InferenceEmbeddingProvider<C> {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector, DomainError> {
        let body = Self::build_request(text);

        let response = self
            .client
            .post_json(&self.url, self.headers(), &body)
            .await
            .map_err(|e| match e {
                HttpError::Transport(_) | HttpError::Status { .. } => {
                    DomainError::embedding_unavailable(e.to_string())
                }
                HttpError::Body(_) => DomainError::malformed_upstream(PROVIDER_NAME, e.to_string()),
            })?;

        let vector = Self::parse_response(response)?;

        tracing::debug!(
            provider = PROVIDER_NAME,
            dimensions = vector.dimensions(),
            "Embedded query"
        );

        Ok(vector)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[derive(Debug, Deserialize)]
struct EndpointEmbeddingResponse {
    embeddings: EmbeddingsField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingsField {
    Single(Vec<f32>),
    Batch(Vec<Vec<f32>>),
}
