//! Response normalization - deterministic cleanup of raw model output

mod normalizer;
pub mod rules;

pub use normalizer::{NormalizerStrictness, ResponseNormalizer};
