//! Main controller implementation.
//!
//! Builds the fleet and Kubernetes clients, starts the NodeConfiguration
//! watcher in a background task and waits for it or for shutdown.

use crate::watcher::{WatchContext, watch_node_configurations};
use crds::NodeConfiguration;
use fleet_client::{FleetClient, NodeConfigurationApi};
use kube::{Api, Client};
use node_config::Reconciler;
use node_config::backoff::RetryBackoff;
use node_config::config::Config;
use node_config::error::ControllerError;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Main controller for node configuration management.
pub struct Controller {
    node_configuration_watcher: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance and starts watching.
    pub async fn new(config: Config) -> Result<Self, ControllerError> {
        info!("Initializing node configuration controller");

        let kube_client = Client::try_default().await?;

        let fleet_client = FleetClient::new(config.api_url.clone(), config.api_token.clone())?;
        info!("Fleet API client ready for {}", fleet_client.base_url());

        let ns = config.namespace.as_deref().unwrap_or("default");
        let api: Api<NodeConfiguration> = Api::namespaced(kube_client, ns);

        let ctx = Arc::new(WatchContext {
            reconciler: Reconciler::from_client(fleet_client),
            api,
            timeouts: config.timeouts,
            retries: RetryBackoff::default(),
        });

        let node_configuration_watcher = tokio::spawn(async move { watch_node_configurations(ctx).await });

        Ok(Self {
            node_configuration_watcher,
        })
    }

    /// Runs the controller until the watcher exits or a shutdown signal arrives.
    pub async fn run(mut self) -> Result<(), ControllerError> {
        info!("Node configuration controller running");

        tokio::select! {
            result = &mut self.node_configuration_watcher => {
                result.map_err(|e| ControllerError::Watch(format!("NodeConfiguration watcher panicked: {}", e)))?
                    .map_err(|e| ControllerError::Watch(format!("NodeConfiguration watcher error: {}", e)))?;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Shutdown signal received, stopping controller");
                self.node_configuration_watcher.abort();
            }
        }

        Ok(())
    }
}
