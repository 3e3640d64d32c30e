//! API middleware components

pub mod logging;

pub use logging::{extract_request_id, logging_middleware, REQUEST_ID_HEADER};
