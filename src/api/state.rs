//! Application state shared by the handlers

use std::sync::Arc;

use crate::domain::pipeline::RagPipeline;
use crate::domain::retrieval::VectorStore;

/// Collaborators built once at start-up and shared across requests
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RagPipeline>,
    pub vector_store: Arc<dyn VectorStore>,
}

impl AppState {
    pub fn new(pipeline: RagPipeline) -> Self {
        let vector_store = pipeline.retriever().store().clone();

        Self {
            pipeline: Arc::new(pipeline),
            vector_store,
        }
    }

    /// Release pooled connections once the server has stopped accepting requests
    pub async fn shutdown(&self) {
        tracing::info!(store = self.vector_store.store_type(), "Closing vector store");
        self.vector_store.close().await;
    }
}
