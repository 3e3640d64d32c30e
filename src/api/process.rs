//! Question answering endpoint handler

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::info;

use crate::api::middleware::extract_request_id;
use crate::api::state::AppState;
use crate::api::types::{Json, ProcessRequest, ProcessResponse};
use crate::domain::pipeline::PipelineOutcome;

/// POST /process
pub async fn process(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ProcessRequest>,
) -> impl IntoResponse {
    let request_id = extract_request_id(&headers);
    let start = Instant::now();

    info!(
        request_id = %request_id,
        message_len = request.message.len(),
        "Processing question"
    );

    let outcome = state.pipeline.answer(&request.message).await;

    info!(
        request_id = %request_id,
        outcome = outcome.label(),
        error_kind = outcome.error().map(|e| e.kind()).unwrap_or("none"),
        duration_ms = start.elapsed().as_millis() as u64,
        "Question processed"
    );

    (status_for(&outcome), Json(ProcessResponse::from(&outcome)))
}

/// Soft failures stay 200 so clients always render the message
pub(crate) fn status_for(outcome: &PipelineOutcome) -> StatusCode {
    match outcome {
        PipelineOutcome::NoContext => StatusCode::NOT_FOUND,
        PipelineOutcome::Succeeded { .. } | PipelineOutcome::Failed { .. } => StatusCode::OK,
    }
}
