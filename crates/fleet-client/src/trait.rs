//! NodeConfigurationApi trait for mocking
//!
//! This trait abstracts the FleetClient to enable mocking in unit tests.
//! The concrete FleetClient implements this trait, and tests can use mock implementations.

use crate::error::FleetError;
use crate::models::*;

/// Trait for node configuration API operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NodeConfigurationApi: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    async fn list_configurations(&self, cluster_id: &str) -> Result<Vec<NodeConfiguration>, FleetError>;
    async fn get_configuration(&self, cluster_id: &str, id: &str) -> Result<NodeConfiguration, FleetError>;
    async fn create_configuration(&self, cluster_id: &str, request: &NewNodeConfiguration) -> Result<NodeConfiguration, FleetError>;
    async fn update_configuration(&self, cluster_id: &str, id: &str, request: &NodeConfigurationUpdate) -> Result<NodeConfiguration, FleetError>;
    async fn delete_configuration(&self, cluster_id: &str, id: &str) -> Result<(), FleetError>;
}
