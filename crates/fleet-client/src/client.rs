//! Fleet API client
//!
//! Implements the node configuration endpoints of the fleet-management REST API.
//! Based on the API structure: /v1/kubernetes/clusters/{clusterId}/node-configurations

use crate::common::{HttpClient, ensure_segment};
use crate::error::FleetError;
use crate::models::*;
use crate::node_configuration_trait::NodeConfigurationApi;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default request timeout applied by the underlying HTTP client
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fleet API client
#[derive(Debug, Clone)]
pub struct FleetClient {
    http: HttpClient,
}

impl FleetClient {
    /// Create a new fleet client
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g., "https://api.cast.ai")
    /// * `token` - API key sent with every request
    pub fn new(base_url: String, token: String) -> Result<Self, FleetError> {
        Self::with_timeout(base_url, token, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a new fleet client with a custom per-request timeout
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, FleetError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FleetError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    fn configurations_path(cluster_id: &str) -> Result<String, FleetError> {
        ensure_segment("cluster id", cluster_id)?;
        Ok(format!(
            "/v1/kubernetes/clusters/{}/node-configurations",
            urlencoding::encode(cluster_id)
        ))
    }

    fn configuration_path(cluster_id: &str, id: &str) -> Result<String, FleetError> {
        ensure_segment("node configuration id", id)?;
        Ok(format!(
            "{}/{}",
            Self::configurations_path(cluster_id)?,
            urlencoding::encode(id)
        ))
    }
}

#[async_trait::async_trait]
impl NodeConfigurationApi for FleetClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn list_configurations(&self, cluster_id: &str) -> Result<Vec<NodeConfiguration>, FleetError> {
        debug!("Listing node configurations for cluster {}", cluster_id);
        let list: NodeConfigurationList = self.http.get(&Self::configurations_path(cluster_id)?).await?;
        Ok(list.items)
    }

    async fn get_configuration(&self, cluster_id: &str, id: &str) -> Result<NodeConfiguration, FleetError> {
        debug!("Fetching node configuration {} in cluster {}", id, cluster_id);
        self.http.get(&Self::configuration_path(cluster_id, id)?).await
    }

    async fn create_configuration(
        &self,
        cluster_id: &str,
        request: &NewNodeConfiguration,
    ) -> Result<NodeConfiguration, FleetError> {
        debug!("Creating node configuration {} in cluster {}", request.name, cluster_id);
        self.http.post(&Self::configurations_path(cluster_id)?, request).await
    }

    async fn update_configuration(
        &self,
        cluster_id: &str,
        id: &str,
        request: &NodeConfigurationUpdate,
    ) -> Result<NodeConfiguration, FleetError> {
        debug!("Updating node configuration {} in cluster {}", id, cluster_id);
        self.http.post(&Self::configuration_path(cluster_id, id)?, request).await
    }

    async fn delete_configuration(&self, cluster_id: &str, id: &str) -> Result<(), FleetError> {
        debug!("Deleting node configuration {} in cluster {}", id, cluster_id);
        self.http.delete(&Self::configuration_path(cluster_id, id)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_encode_segments() {
        let path = FleetClient::configuration_path("c 1", "a/b").unwrap();
        assert_eq!(path, "/v1/kubernetes/clusters/c%201/node-configurations/a%2Fb");
    }

    #[test]
    fn test_paths_reject_blank_segments() {
        assert!(matches!(
            FleetClient::configurations_path(""),
            Err(FleetError::InvalidRequest(_))
        ));
        assert!(matches!(
            FleetClient::configuration_path("c1", "  "),
            Err(FleetError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = FleetClient::new("http://fleet:8080/".to_string(), "t".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://fleet:8080");
    }
}
