//! Request and response types for the Calscape API.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Query parameters accepted by `POST /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Maximum number of results; falls back to the configured default
    pub limit: Option<usize>,
}
