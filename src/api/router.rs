use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::health;
use super::middleware::{logging_middleware, REQUEST_ID_HEADER};
use super::process;
use super::state::AppState;
use crate::config::CorsConfig;

/// Create the full router with application state
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/process", post(process::process))
        .with_state(state)
        // Outermost layer first
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors_layer(cors))
                .layer(middleware::from_fn(logging_middleware)),
        )
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::generation::{GenerationResult, MockGenerator};
    use crate::domain::pipeline::{
        RagPipeline, NO_CONTEXT_MESSAGE, UNAVAILABLE_MESSAGE, WARMING_UP_MESSAGE,
    };
    use crate::domain::retrieval::{MockVectorStore, Passage, Retriever, RetrieverConfig};
    use crate::domain::DomainError;

    fn state(
        embedder: MockEmbeddingProvider,
        store: MockVectorStore,
        generator: MockGenerator,
    ) -> AppState {
        let retriever = Retriever::new(Arc::new(store), RetrieverConfig::default()).unwrap();

        AppState::new(RagPipeline::new(
            Arc::new(embedder),
            retriever,
            Arc::new(generator),
        ))
    }

    fn generator_returning(result: GenerationResult) -> MockGenerator {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(move |_| result.clone());
        generator.expect_generator_name().return_const("mock");
        generator
    }

    fn idle_generator() -> MockGenerator {
        let mut generator = MockGenerator::new();
        generator.expect_generate().never();
        generator.expect_generator_name().return_const("mock");
        generator
    }

    fn store_with_passage() -> MockVectorStore {
        MockVectorStore::new().with_passages(vec![Passage::new(
            "doc1",
            "ECE 564 is taught by Dr. Smith.",
            0.92,
        )])
    }

    fn app(state: AppState) -> Router {
        create_router(state, &CorsConfig::default())
    }

    fn post_process(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/process")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_process_returns_normalized_answer() {
        let app = app(state(
            MockEmbeddingProvider::new(3),
            store_with_passage(),
            generator_returning(GenerationResult::generated(
                "Dr. Smith teaches ECE 564. Contact 3. 4",
            )),
        ));

        let response = app
            .oneshot(post_process(r#"{"message": "Who teaches ECE 564?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(
            json_body(response).await,
            json!({"message": "Dr. Smith teaches ECE 564."})
        );
    }

    #[tokio::test]
    async fn test_process_without_context_is_not_found() {
        let app = app(state(
            MockEmbeddingProvider::new(3),
            MockVectorStore::new(),
            idle_generator(),
        ));

        let response = app
            .oneshot(post_process(r#"{"message": "Unrelated question"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({"message": NO_CONTEXT_MESSAGE}));
    }

    #[tokio::test]
    async fn test_process_embedding_failure_is_soft() {
        let app = app(state(
            MockEmbeddingProvider::new(3)
                .with_error(DomainError::embedding_unavailable("model loading")),
            store_with_passage(),
            idle_generator(),
        ));

        let response = app.oneshot(post_process("{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"message": WARMING_UP_MESSAGE}));
    }

    #[tokio::test]
    async fn test_process_generation_failure_masks_detail() {
        let app = app(state(
            MockEmbeddingProvider::new(3),
            store_with_passage(),
            generator_returning(GenerationResult::failed(DomainError::generation_failed(
                "upstream error: CUDA out of memory",
            ))),
        ));

        let response = app
            .oneshot(post_process(r#"{"message": "Who teaches ECE 564?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, json!({"message": UNAVAILABLE_MESSAGE}));
        assert!(!body.to_string().contains("CUDA"));
    }

    #[tokio::test]
    async fn test_process_malformed_json_is_rejected() {
        let app = app(state(
            MockEmbeddingProvider::new(3),
            store_with_passage(),
            idle_generator(),
        ));

        let response = app.oneshot(post_process(r#"{"message": "#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_ready_reflects_vector_store_health() {
        let healthy = app(state(
            MockEmbeddingProvider::new(3),
            MockVectorStore::new(),
            idle_generator(),
        ));
        let unhealthy = app(state(
            MockEmbeddingProvider::new(3),
            MockVectorStore::new().with_error(DomainError::retrieval_failed("down")),
            idle_generator(),
        ));

        let ready = |app: Router| async move {
            app.oneshot(Request::get("/ready").body(Body::empty()).unwrap())
                .await
                .unwrap()
                .status()
        };

        assert_eq!(ready(healthy).await, StatusCode::OK);
        assert_eq!(ready(unhealthy).await, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_ready_hides_store_error_detail() {
        let app = app(state(
            MockEmbeddingProvider::new(3),
            MockVectorStore::new().with_health_error(DomainError::retrieval_failed(
                "Health check failed: connection to postgres://rag:hunter2@db:5432 refused",
            )),
            idle_generator(),
        ));

        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json_body(response).await;
        let rendered = body.to_string();

        assert_eq!(body["checks"][0]["message"], "vector store unavailable");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("postgres://"));
    }

    #[tokio::test]
    async fn test_process_echoes_client_request_id() {
        let app = app(state(
            MockEmbeddingProvider::new(3),
            store_with_passage(),
            generator_returning(GenerationResult::generated("Fall semester.")),
        ));

        let mut request = post_process(r#"{"message": "When is ECE 564 taught?"}"#);
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER, HeaderValue::from_static("client-req-42"));

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "client-req-42"
        );
    }

    #[tokio::test]
    async fn test_health_and_live() {
        let app = app(state(
            MockEmbeddingProvider::new(3),
            MockVectorStore::new(),
            idle_generator(),
        ));

        let health = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let live = app
            .oneshot(Request::get("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(json_body(health).await["status"], "healthy");
        assert_eq!(live.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let cors = CorsConfig {
            allowed_origins: vec!["https://chat.example.com".to_string()],
        };
        let app = create_router(
            state(
                MockEmbeddingProvider::new(3),
                MockVectorStore::new(),
                idle_generator(),
            ),
            &cors,
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/process")
                    .header(header::ORIGIN, "https://chat.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("https://chat.example.com")
        );
    }
}
