//! Hosted inference endpoint generator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::generation::{GenerationRequest, GenerationResult, Generator};
use crate::domain::prompt::{extract_response, render_prompt};
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClientTrait;

const GENERATOR_NAME: &str = "inference-generation";

/// Wire shape of the generation request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    /// `{"inputs": "", "question", "context", "temp", "max_tokens"}`
    #[default]
    Structured,
    /// `{"inputs": <rendered prompt>, "parameters": {...}}`
    Concatenated,
}

/// Generator backed by a hosted inference endpoint
#[derive(Debug)]
pub struct InferenceGenerator<C: HttpClientTrait> {
    client: C,
    url: String,
    auth_header: String,
    format: PayloadFormat,
}

impl<C: HttpClientTrait> InferenceGenerator<C> {
    pub fn new(client: C, url: impl Into<String>, api_key: impl AsRef<str>) -> Self {
        Self {
            client,
            url: url.into(),
            auth_header: format!("Bearer {}", api_key.as_ref()),
            format: PayloadFormat::default(),
        }
    }

    pub fn with_format(mut self, format: PayloadFormat) -> Self {
        self.format = format;
        self
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Accept", "application/json"),
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, request: &GenerationRequest) -> Value {
        match self.format {
            PayloadFormat::Structured => json!({
                "inputs": "",
                "question": request.question(),
                "context": request.context(),
                "temp": request.temperature(),
                "max_tokens": request.max_tokens(),
            }),
            PayloadFormat::Concatenated => json!({
                "inputs": render_prompt(request),
                "parameters": {
                    "temperature": request.temperature(),
                    "max_new_tokens": request.max_tokens(),
                },
            }),
        }
    }

    async fn call(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        let body = self.build_request(request);

        let response = self
            .client
            .post_json(&self.url, self.headers(), &body)
            .await
            .map_err(|e| DomainError::generation_failed(e.to_string()))?;

        let text = parse_response(response)?;

        Ok(extract_response(&text).to_string())
    }
}

/// Accepts a bare string, `{"generated_text"}` or `[{"generated_text"}, ...]`.
/// An `{"error"}` object is an upstream failure.
fn parse_response(response: Value) -> Result<String, DomainError> {
    if let Some(error) = response.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(DomainError::generation_failed(format!(
            "upstream error: {}",
            message
        )));
    }

    let text = match &response {
        Value::String(text) => Some(text.as_str()),
        Value::Object(_) => response.get("generated_text").and_then(Value::as_str),
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("generated_text"))
            .and_then(Value::as_str),
        _ => None,
    };

    text.map(str::to_string).ok_or_else(|| {
        DomainError::malformed_upstream(
            GENERATOR_NAME,
            format!("unexpected response shape: {}", truncate_for_log(&response)),
        )
    })
}

fn truncate_for_log(value: &Value) -> String {
    const MAX: usize = 200;
    let rendered = value.to_string();

    match rendered.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &rendered[..cut]),
        None => rendered,
    }
}

#[async_trait]
impl<C: HttpClientTrait> Generator for InferenceGenerator<C> {
    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let result = self.call(request).await;

        match &result {
            Ok(text) => tracing::debug!(
                generator = GENERATOR_NAME,
                output_len = text.len(),
                "Generation completed"
            ),
            Err(e) => tracing::error!(
                generator = GENERATOR_NAME,
                error = %e,
                "Failed to get response from generation endpoint"
            ),
        }

        result.into()
    }

    fn generator_name(&self) -> &'static str {
        GENERATOR_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::GenerationParams;
    use crate::infrastructure::http::{HttpError, MockHttpClient};

    const TEST_URL: &str = "https://model.example.com/generate";

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            "Who teaches ECE 564?",
            "ECE 564 is taught by Dr. Smith.",
            GenerationParams::default(),
        )
    }

    fn generator(client: MockHttpClient) -> InferenceGenerator<MockHttpClient> {
        InferenceGenerator::new(client, TEST_URL, "model-key")
    }

    #[tokio::test]
    async fn test_structured_payload() {
        let client = MockHttpClient::new().with_response(TEST_URL, json!("Dr. Smith teaches it."));
        let generator = generator(client);

        let result = generator.generate(&request()).await;

        assert_eq!(result, GenerationResult::generated("Dr. Smith teaches it."));

        let sent = &generator.client.requests()[0];
        assert_eq!(sent.body["inputs"], json!(""));
        assert_eq!(sent.body["question"], json!("Who teaches ECE 564?"));
        assert_eq!(sent.body["context"], json!("ECE 564 is taught by Dr. Smith."));
        assert_eq!(sent.body["max_tokens"], json!(250));
        assert!((sent.body["temp"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(sent.header("authorization"), Some("Bearer model-key"));
    }

    #[tokio::test]
    async fn test_concatenated_payload() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, json!([{"generated_text": "Dr. Smith."}]));
        let generator = generator(client).with_format(PayloadFormat::Concatenated);

        let result = generator.generate(&request()).await;

        assert_eq!(result.text(), Some("Dr. Smith."));

        let sent = &generator.client.requests()[0];
        let inputs = sent.body["inputs"].as_str().unwrap();
        assert!(inputs.contains("ECE 564 is taught by Dr. Smith."));
        assert!(inputs.ends_with("### Response:"));
        assert_eq!(sent.body["parameters"]["max_new_tokens"], json!(250));
    }

    #[tokio::test]
    async fn test_generated_text_object_with_echoed_prompt() {
        let client = MockHttpClient::new().with_response(
            TEST_URL,
            json!({"generated_text": "### Question:\nWho?\n\n### Response:\n Dr. Smith."}),
        );

        let result = generator(client).generate(&request()).await;

        assert_eq!(result.text(), Some("Dr. Smith."));
    }

    #[tokio::test]
    async fn test_upstream_error_object() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, json!({"error": "Model is currently loading", "estimated_time": 20.0}));

        let result = generator(client).generate(&request()).await;

        assert!(matches!(
            result,
            GenerationResult::Failed(DomainError::GenerationFailed { ref message })
                if message.contains("currently loading")
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_tagged() {
        let client = MockHttpClient::new()
            .with_error(TEST_URL, HttpError::Transport("timed out".to_string()));

        let result = generator(client).generate(&request()).await;

        assert!(matches!(
            result,
            GenerationResult::Failed(DomainError::GenerationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_status_failure_is_tagged() {
        let client = MockHttpClient::new().with_error(
            TEST_URL,
            HttpError::Status {
                status: 500,
                body: "internal".to_string(),
            },
        );

        let result = generator(client).generate(&request()).await;

        assert!(result.is_failed());
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_malformed() {
        let client = MockHttpClient::new().with_response(TEST_URL, json!({"outputs": 42}));

        let result = generator(client).generate(&request()).await;

        assert!(matches!(
            result,
            GenerationResult::Failed(DomainError::MalformedUpstreamResponse { .. })
        ));
    }

    #[test]
    fn test_truncate_for_log() {
        let long = Value::String("x".repeat(500));

        assert!(truncate_for_log(&long).len() < 220);
        assert_eq!(truncate_for_log(&json!(1)), "1");
    }
}
