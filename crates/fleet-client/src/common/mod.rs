//! Common utilities for the fleet API client
//!
//! Provides the authenticated HTTP wrapper shared by every endpoint.

use crate::error::FleetError;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Reject path segments that would produce a malformed URL.
pub fn ensure_segment(what: &str, value: &str) -> Result<(), FleetError> {
    if value.trim().is_empty() {
        return Err(FleetError::InvalidRequest(format!("{} must not be empty", what)));
    }
    Ok(())
}

/// HTTP client wrapper with authentication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Make a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, FleetError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FleetError::Http)?;

        let response = Self::check_status(response).await?;
        Self::decode(path, response).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FleetError> {
        let url = self.build_url(path);
        let payload = serde_json::to_value(body)?;
        debug!("POST {} with body: {}", url, payload);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.token)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(FleetError::Http)?;

        let response = Self::check_status(response).await?;
        Self::decode(path, response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), FleetError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .header(API_KEY_HEADER, &self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FleetError::Http)?;

        Self::check_status(response).await?;
        Ok(())
    }

    /// Turn any non-2xx response into an error carrying status and body.
    async fn check_status(response: Response) -> Result<Response, FleetError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(FleetError::NotFound { body });
        }
        Err(FleetError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: for<'de> Deserialize<'de>>(
        path: &str,
        response: Response,
    ) -> Result<T, FleetError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| FleetError::Decode {
            path: path.to_string(),
            message: format!(
                "{} - Response (first 500 chars): {}",
                e,
                text.chars().take(500).collect::<String>()
            ),
        })
    }
}
