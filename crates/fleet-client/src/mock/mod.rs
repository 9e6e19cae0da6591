//! Mock FleetClient for unit testing
//!
//! This module provides a mock implementation of NodeConfigurationApi that can be used
//! in unit tests without requiring a reachable fleet API.
//!
//! - `mod.rs` - storage, call accounting, failure and latency injection
//! - `helpers.rs` - server-side defaulting and model builders

mod helpers;

pub use helpers::{sample_configuration, MockCalls};

use crate::error::FleetError;
use crate::models::*;
use crate::node_configuration_trait::NodeConfigurationApi;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Endpoints of the node configuration API, used to target failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List,
    Get,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
struct StoredConfiguration {
    cluster_id: String,
    configuration: NodeConfiguration,
}

/// Mock FleetClient for testing
///
/// This mock stores configurations in memory (in insertion order, like the real
/// list endpoint) and can be configured to fail specific endpoints.
#[derive(Debug, Clone)]
pub struct MockFleetClient {
    pub(crate) base_url: String,
    configurations: Arc<Mutex<Vec<StoredConfiguration>>>,
    calls: Arc<Mutex<MockCalls>>,
    failures: Arc<Mutex<HashMap<Endpoint, (u16, String)>>>,
    delays: Arc<Mutex<HashMap<Endpoint, Duration>>>,
    last_create: Arc<Mutex<Option<serde_json::Value>>>,
    last_update: Arc<Mutex<Option<serde_json::Value>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockFleetClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            configurations: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(MockCalls::default())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            delays: Arc::new(Mutex::new(HashMap::new())),
            last_create: Arc::new(Mutex::new(None)),
            last_update: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a configuration to the mock store (for test setup).
    ///
    /// A configuration without an id is given a fresh UUID; the id is returned.
    pub fn add_configuration(&self, cluster_id: &str, mut configuration: NodeConfiguration) -> String {
        let id = configuration
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        configuration.id = Some(id.clone());
        lock(&self.configurations).push(StoredConfiguration {
            cluster_id: cluster_id.to_string(),
            configuration,
        });
        id
    }

    /// Current stored state of a configuration
    pub fn configuration(&self, cluster_id: &str, id: &str) -> Option<NodeConfiguration> {
        lock(&self.configurations)
            .iter()
            .find(|s| s.cluster_id == cluster_id && s.configuration.id.as_deref() == Some(id))
            .map(|s| s.configuration.clone())
    }

    /// Remove a configuration behind the reconciler's back (simulates out-of-band deletion)
    pub fn remove_configuration(&self, cluster_id: &str, id: &str) -> bool {
        let mut store = lock(&self.configurations);
        let before = store.len();
        store.retain(|s| !(s.cluster_id == cluster_id && s.configuration.id.as_deref() == Some(id)));
        store.len() != before
    }

    /// Make every call to `endpoint` answer with `status` and `body` until cleared
    pub fn fail_endpoint(&self, endpoint: Endpoint, status: u16, body: impl Into<String>) {
        lock(&self.failures).insert(endpoint, (status, body.into()));
    }

    /// Stop failing `endpoint`
    pub fn clear_failure(&self, endpoint: Endpoint) {
        lock(&self.failures).remove(&endpoint);
    }

    /// Make every call to `endpoint` take `delay` before it answers
    pub fn delay_endpoint(&self, endpoint: Endpoint, delay: Duration) {
        lock(&self.delays).insert(endpoint, delay);
    }

    /// Number of calls made per endpoint so far
    pub fn calls(&self) -> MockCalls {
        *lock(&self.calls)
    }

    /// The JSON body of the most recent create request, exactly as it would go on the wire
    pub fn last_create_request(&self) -> Option<serde_json::Value> {
        lock(&self.last_create).clone()
    }

    /// The JSON body of the most recent update request
    pub fn last_update_request(&self) -> Option<serde_json::Value> {
        lock(&self.last_update).clone()
    }

    async fn record(&self, endpoint: Endpoint) -> Result<(), FleetError> {
        lock(&self.calls).record(endpoint);
        let delay = lock(&self.delays).get(&endpoint).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match lock(&self.failures).get(&endpoint) {
            Some((404, body)) => Err(FleetError::NotFound { body: body.clone() }),
            Some((status, body)) => Err(FleetError::Api {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> FleetError {
        FleetError::NotFound {
            body: format!("{{\"message\":\"node configuration {} not found\"}}", id),
        }
    }
}

#[async_trait::async_trait]
impl NodeConfigurationApi for MockFleetClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_configurations(&self, cluster_id: &str) -> Result<Vec<NodeConfiguration>, FleetError> {
        self.record(Endpoint::List).await?;
        Ok(lock(&self.configurations)
            .iter()
            .filter(|s| s.cluster_id == cluster_id)
            .map(|s| s.configuration.clone())
            .collect())
    }

    async fn get_configuration(&self, cluster_id: &str, id: &str) -> Result<NodeConfiguration, FleetError> {
        self.record(Endpoint::Get).await?;
        self.configuration(cluster_id, id).ok_or_else(|| Self::not_found(id))
    }

    async fn create_configuration(
        &self,
        cluster_id: &str,
        request: &NewNodeConfiguration,
    ) -> Result<NodeConfiguration, FleetError> {
        *lock(&self.last_create) = Some(serde_json::to_value(request)?);
        self.record(Endpoint::Create).await?;

        let duplicate = lock(&self.configurations)
            .iter()
            .any(|s| s.cluster_id == cluster_id && s.configuration.name.as_deref() == Some(&request.name));
        if duplicate {
            return Err(FleetError::Api {
                status: 409,
                body: format!("{{\"message\":\"node configuration {} already exists\"}}", request.name),
            });
        }

        let configuration = helpers::created_from(request);
        self.add_configuration(cluster_id, configuration.clone());
        Ok(configuration)
    }

    async fn update_configuration(
        &self,
        cluster_id: &str,
        id: &str,
        request: &NodeConfigurationUpdate,
    ) -> Result<NodeConfiguration, FleetError> {
        *lock(&self.last_update) = Some(serde_json::to_value(request)?);
        self.record(Endpoint::Update).await?;

        let mut store = lock(&self.configurations);
        let stored = store
            .iter_mut()
            .find(|s| s.cluster_id == cluster_id && s.configuration.id.as_deref() == Some(id))
            .ok_or_else(|| Self::not_found(id))?;
        helpers::apply_update(&mut stored.configuration, request);
        Ok(stored.configuration.clone())
    }

    async fn delete_configuration(&self, cluster_id: &str, id: &str) -> Result<(), FleetError> {
        self.record(Endpoint::Delete).await?;

        let is_default = self
            .configuration(cluster_id, id)
            .ok_or_else(|| Self::not_found(id))?
            .default
            .unwrap_or(false);
        if is_default {
            return Err(FleetError::Api {
                status: 400,
                body: "{\"message\":\"default node configuration cannot be deleted\"}".to_string(),
            });
        }

        self.remove_configuration(cluster_id, id);
        Ok(())
    }
}
