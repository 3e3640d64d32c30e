//! Single-string prompt rendering and response marker handling

use crate::domain::generation::GenerationRequest;

/// Marker preceding the model's answer in single-string prompts
pub const RESPONSE_MARKER: &str = "### Response:";

/// Render a request as one instruction-style prompt string
pub fn render_prompt(request: &GenerationRequest) -> String {
    format!(
        "### Context:\n{}\n\n### Question:\n{}\n\n{}",
        request.context(),
        request.question(),
        RESPONSE_MARKER
    )
}

/// Keep only the text after the first response marker.
///
/// Models that echo the prompt return it ahead of the answer. Text without the
/// marker is returned as-is.
pub fn extract_response(text: &str) -> &str {
    match text.find(RESPONSE_MARKER) {
        Some(start) => text[start + RESPONSE_MARKER.len()..].trim(),
        None => text,
    }
}
