//! Fleet-management REST API client
//!
//! A Rust client library for the node configuration endpoints of the
//! fleet-management API. Provides type-safe wire models and one method per
//! endpoint; every call is a single request with no retry.
//!
//! # Example
//!
//! ```no_run
//! use fleet_client::{FleetClient, NewNodeConfiguration, NodeConfigurationApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FleetClient::new(
//!     "https://api.cast.ai".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // List configurations of a cluster
//! let configurations = client.list_configurations("cluster-id").await?;
//!
//! // Create a new one; omitted fields take server defaults
//! let request = NewNodeConfiguration {
//!     name: "pool-a".to_string(),
//!     subnets: Some(vec!["subnet-1".to_string()]),
//!     ..Default::default()
//! };
//! let created = client.create_configuration("cluster-id", &request).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod node_configuration_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::FleetClient;
pub use common::HttpClient;
pub use error::FleetError;
pub use models::*;
pub use node_configuration_trait::NodeConfigurationApi;
#[cfg(feature = "test-util")]
pub use mock::{Endpoint, MockCalls, MockFleetClient, sample_configuration};
