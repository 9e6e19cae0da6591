//! Node configuration controller
//!
//! Reconciles `NodeConfiguration` custom resources against the
//! fleet-management API: creates, adopts (via the import annotation),
//! updates and deletes node configurations, recording the server's
//! normalized view in each object's status.

mod controller;
mod watcher;

use controller::Controller;
use node_config::config::Config;
use node_config::error::ControllerError;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    // kube and reqwest both pull in rustls; pick the provider once up front
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting node configuration controller");

    let config = Config::from_env()?;

    info!("Configuration:");
    info!("  Fleet API URL: {}", config.api_url);
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("default"));
    info!("  Operation timeout: {:?}", config.timeouts.create);

    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
