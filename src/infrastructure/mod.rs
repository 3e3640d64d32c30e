//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod generation;
pub mod http;
pub mod logging;
pub mod vector_store;
