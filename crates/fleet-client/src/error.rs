//! Fleet client errors

use thiserror::Error;

/// Errors that can occur when interacting with the fleet-management API
#[derive(Debug, Error)]
pub enum FleetError {
    /// HTTP request/response error (connection refused, TLS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Fleet API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// The API answered 404
    #[error("Not found: {body}")]
    NotFound { body: String },

    /// JSON serialization error while building a request
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response body could not be decoded into the expected model
    #[error("error decoding response body from {path}: {message}")]
    Decode { path: String, message: String },

    /// Invalid request (e.g., missing required path segment)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FleetError {
    /// HTTP status carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FleetError::Api { status, .. } => Some(*status),
            FleetError::NotFound { .. } => Some(404),
            FleetError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FleetError::NotFound { .. })
    }
}
