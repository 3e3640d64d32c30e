//! Grounded answer service
//!
//! Answers natural-language questions with a retrieval-augmented pipeline:
//! - Embed the question through a hosted embedding endpoint
//! - Retrieve the closest passages from a pre-indexed vector store
//! - Ground a hosted generation model on the top passage
//! - Normalize the raw completion into a clean, user-facing answer

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::{VectorStoreBackend, VectorStoreConfig};
use domain::{
    DomainError, GenerationParams, PromptBuilder, RagPipeline, ResponseNormalizer, Retriever,
    RetrieverConfig, VectorStore,
};
use infrastructure::{
    embedding::InferenceEmbeddingProvider,
    generation::InferenceGenerator,
    http::HttpClient,
    vector_store::{InMemoryVectorStore, PgvectorConfig, PgvectorStore},
};
use tracing::{info, warn};

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    require("embedding.url (EMBEDDINGS_API_URL)", &config.embedding.url)?;
    require("generation.url (MODEL_API_URL)", &config.generation.url)?;

    if config.pipeline.stage_timeout_secs == 0 {
        return Err(
            DomainError::configuration("pipeline.stage_timeout_secs must be at least 1").into(),
        );
    }

    let embedder = InferenceEmbeddingProvider::new(
        HttpClient::with_timeout(config.embedding.request_timeout())?,
        &config.embedding.url,
        &config.embedding.api_key,
    );

    let generator = InferenceGenerator::new(
        HttpClient::with_timeout(config.generation.request_timeout())?,
        &config.generation.url,
        &config.generation.api_key,
    )
    .with_format(config.generation.format);

    let store = create_vector_store(&config.vector_store).await?;
    info!(store = store.store_type(), "Vector store ready");

    let retriever = Retriever::new(
        store,
        RetrieverConfig {
            top_k: config.retrieval.top_k,
            num_candidates: config.retrieval.num_candidates,
            min_similarity: config.retrieval.min_similarity,
            dimensions: config.retrieval.dimensions,
        },
    )?;

    let prompt_builder = PromptBuilder::new(GenerationParams {
        temperature: config.generation.temperature,
        max_tokens: config.generation.max_tokens,
    });

    let pipeline = RagPipeline::new(Arc::new(embedder), retriever, Arc::new(generator))
        .with_prompt_builder(prompt_builder)
        .with_normalizer(ResponseNormalizer::new(config.normalizer.strictness))
        .with_stage_timeout(config.pipeline.stage_timeout());

    Ok(AppState::new(pipeline))
}

async fn create_vector_store(
    config: &VectorStoreConfig,
) -> Result<Arc<dyn VectorStore>, DomainError> {
    match config.backend {
        VectorStoreBackend::Pgvector => {
            let uri = config.uri.as_deref().ok_or_else(|| {
                DomainError::configuration(
                    "vector_store.uri (VECTOR_STORE_URI or DATABASE_URL) is required for the pgvector backend",
                )
            })?;

            let pg_config = PgvectorConfig::new(&config.table)
                .with_id_column(&config.id_column)
                .with_chunk_column(&config.chunk_column)
                .with_embedding_column(&config.embedding_column);

            info!(table = %config.table, "Connecting to pgvector store");
            let store = PgvectorStore::connect(uri, config.max_connections, pg_config).await?;

            Ok(Arc::new(store))
        }
        VectorStoreBackend::InMemory => match &config.snapshot_path {
            Some(path) => Ok(Arc::new(InMemoryVectorStore::from_json_file(path)?)),
            None => {
                warn!("In-memory vector store has no snapshot; every question will find no context");
                Ok(Arc::new(InMemoryVectorStore::default()))
            }
        },
    }
}

fn require(name: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::configuration(format!("{} must be set", name)));
    }

    Ok(())
}
