//! API request and response types

pub mod error;
pub mod json;
pub mod process;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use process::{ProcessRequest, ProcessResponse};
