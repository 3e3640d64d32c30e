//! Generation domain - request payload, result and generator contract

mod generator;
mod request;
mod result;

pub use generator::Generator;
pub use request::{
    GenerationParams, GenerationRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use result::GenerationResult;

#[cfg(test)]
pub use generator::MockGenerator;
