//! Pipeline orchestrator

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{PipelineOutcome, PipelineStage};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::error::DomainError;
use crate::domain::generation::{GenerationResult, Generator};
use crate::domain::normalizer::ResponseNormalizer;
use crate::domain::prompt::PromptBuilder;
use crate::domain::retrieval::Retriever;

/// Per-stage time budget applied when none is configured
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the answer state machine once per query.
///
/// Holds only shared, read-only collaborators, so one instance serves
/// concurrent requests.
pub struct RagPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    retriever: Retriever,
    prompt_builder: PromptBuilder,
    generator: Arc<dyn Generator>,
    normalizer: ResponseNormalizer,
    stage_timeout: Duration,
}

impl Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("embedder", &self.embedder.provider_name())
            .field("retriever", &self.retriever)
            .field("prompt_builder", &self.prompt_builder)
            .field("generator", &self.generator.generator_name())
            .field("normalizer", &self.normalizer)
            .field("stage_timeout", &self.stage_timeout)
            .finish()
    }
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        retriever: Retriever,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            embedder,
            retriever,
            prompt_builder: PromptBuilder::default(),
            generator,
            normalizer: ResponseNormalizer::default(),
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }

    pub fn with_prompt_builder(mut self, prompt_builder: PromptBuilder) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    pub fn with_normalizer(mut self, normalizer: ResponseNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Answer a query. Never errors: every failure becomes a terminal outcome.
    pub async fn answer(&self, query: &str) -> PipelineOutcome {
        let vector = match self
            .run_stage(PipelineStage::Embedding, self.embedder.embed(query))
            .await
        {
            Ok(vector) => vector,
            Err(error) => return self.fail(PipelineStage::Embedding, error),
        };

        debug!(dimensions = vector.dimensions(), "Query embedded");

        let retrieval = match self
            .run_stage(PipelineStage::Retrieving, self.retriever.retrieve_top(&vector))
            .await
        {
            Ok(retrieval) => retrieval,
            Err(error) => return self.fail(PipelineStage::Retrieving, error),
        };

        let Some(top) = retrieval.top() else {
            info!("No grounding passage found for query");
            return PipelineOutcome::NoContext;
        };

        debug!(
            passage_id = %top.id,
            score = top.score,
            candidates = retrieval.len(),
            "Grounding on top passage"
        );

        let request = self.prompt_builder.build(query, &top.chunk);

        let result = tokio::time::timeout(self.stage_timeout, self.generator.generate(&request))
            .await
            .unwrap_or_else(|_| {
                GenerationResult::failed(PipelineStage::Generating.timeout_error(self.stage_timeout))
            });

        match result {
            GenerationResult::Generated(raw) => {
                let answer = self.normalizer.normalize(&raw);

                if answer.is_empty() {
                    return self.fail(
                        PipelineStage::Generating,
                        DomainError::malformed_upstream(
                            self.generator.generator_name(),
                            "answer is empty after normalization",
                        ),
                    );
                }

                info!(
                    raw_len = raw.len(),
                    answer_len = answer.len(),
                    "Answer generated"
                );

                PipelineOutcome::Succeeded { answer }
            }
            GenerationResult::Failed(error) => self.fail(PipelineStage::Generating, error),
        }
    }

    async fn run_stage<T>(
        &self,
        stage: PipelineStage,
        future: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        tokio::time::timeout(self.stage_timeout, future)
            .await
            .unwrap_or_else(|_| Err(stage.timeout_error(self.stage_timeout)))
    }

    fn fail(&self, stage: PipelineStage, error: DomainError) -> PipelineOutcome {
        warn!(
            stage = %stage,
            error_kind = error.kind(),
            error = %error,
            "Pipeline stage failed"
        );

        PipelineOutcome::Failed { stage, error }
    }
}
