//! Outbound HTTP plumbing shared by the embedding and generation endpoints

mod client;

pub use client::{HttpClient, HttpClientTrait, HttpError};

#[cfg(test)]
pub use client::mock::MockHttpClient;
