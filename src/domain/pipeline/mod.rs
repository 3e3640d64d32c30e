//! Answer pipeline - embed, retrieve, prompt, generate, normalize

mod orchestrator;
mod outcome;

pub use orchestrator::{RagPipeline, DEFAULT_STAGE_TIMEOUT};
pub use outcome::{
    PipelineOutcome, PipelineStage, NO_CONTEXT_MESSAGE, UNAVAILABLE_MESSAGE, WARMING_UP_MESSAGE,
};
