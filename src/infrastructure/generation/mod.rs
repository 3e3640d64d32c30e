//! Generator implementations

mod inference_endpoint;

pub use inference_endpoint::{InferenceGenerator, PayloadFormat};
