//! Prompt building - turns a question and its grounding passage into a generation request

mod builder;
mod template;

pub use builder::PromptBuilder;
pub use template::{extract_response, render_prompt, RESPONSE_MARKER};
