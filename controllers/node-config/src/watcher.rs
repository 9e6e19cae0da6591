//! NodeConfiguration watcher.
//!
//! Runs a `kube_runtime::Controller` over `NodeConfiguration` objects and
//! hands each one to the reconciler. Status and finalizer writes happen here;
//! the decisions live in `node_config::host`.

use crds::{NodeConfiguration, NodeConfigurationStatus};
use futures::StreamExt;
use kube::api::{Patch, PatchParams};
use kube::{Api, ResourceExt};
use kube_runtime::{
    Controller, watcher,
    controller::{Action, Config as ControllerConfig},
};
use node_config::backoff::RetryBackoff;
use node_config::config::Timeouts;
use node_config::error::ControllerError;
use node_config::host;
use node_config::{DeleteOutcome, Reconciler};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const FIELD_MANAGER: &str = "node-config-controller";

/// Interval between drift checks of a converged configuration
const RESYNC_INTERVAL: Duration = Duration::from_secs(300);

/// Shared state handed to every reconcile call
pub struct WatchContext {
    pub reconciler: Reconciler,
    pub api: Api<NodeConfiguration>,
    pub timeouts: Timeouts,
    pub retries: RetryBackoff,
}

/// Watch `NodeConfiguration` objects until the stream ends.
pub async fn watch_node_configurations(ctx: Arc<WatchContext>) -> Result<(), ControllerError> {
    info!("Starting NodeConfiguration watcher");

    // One reconcile per object at a time; failures are retried with backoff
    let controller_config = ControllerConfig::default()
        .debounce(Duration::from_secs(5))
        .concurrency(3);

    Controller::new(ctx.api.clone(), watcher::Config::default())
        .with_config(controller_config)
        .run(reconcile, error_policy, ctx)
        .for_each(|res| async move {
            match res {
                Ok((obj, _action)) => debug!("Reconciled NodeConfiguration {}", obj.name),
                Err(e) => error!("NodeConfiguration controller error: {}", e),
            }
        })
        .await;

    Ok(())
}

fn error_policy(obj: Arc<NodeConfiguration>, error: &ControllerError, ctx: Arc<WatchContext>) -> Action {
    let delay = ctx.retries.next_delay(&object_key(&obj));
    error!(
        "Reconciliation error for NodeConfiguration {}: {} (retrying in {:?})",
        obj.name_any(),
        error,
        delay
    );
    Action::requeue(delay)
}

fn object_key(obj: &NodeConfiguration) -> String {
    format!("{}/{}", obj.namespace().unwrap_or_default(), obj.name_any())
}

async fn reconcile(obj: Arc<NodeConfiguration>, ctx: Arc<WatchContext>) -> Result<Action, ControllerError> {
    let name = obj.name_any();
    let namespace = obj.namespace().unwrap_or_default();

    if obj.metadata.deletion_timestamp.is_some() {
        let action = finalize(&obj, &ctx).await?;
        ctx.retries.reset(&object_key(&obj));
        return Ok(action);
    }

    if !host::has_finalizer(&obj) {
        debug!("Adding finalizer to NodeConfiguration {}/{}", namespace, name);
        patch_finalizers(&ctx.api, &name, host::finalizers_with(&obj)).await?;
    }

    let current = obj.status.as_ref();
    match host::converge(
        &ctx.reconciler,
        &ctx.timeouts,
        &obj.spec,
        current,
        host::import_key(&obj),
    )
    .await
    {
        Ok(next) => {
            write_status(&ctx.api, &name, current, &next).await?;
            ctx.retries.reset(&object_key(&obj));
            if next.configuration_id.is_none() {
                // Removed remotely; come back soon to re-create it
                return Ok(Action::requeue(Duration::from_secs(1)));
            }
            Ok(Action::requeue(RESYNC_INTERVAL))
        }
        Err(e) => {
            let next = host::failed_status(current, &e);
            if let Err(status_error) = write_status(&ctx.api, &name, current, &next).await {
                error!(
                    "Failed to record error on NodeConfiguration {}/{}: {}",
                    namespace, name, status_error
                );
            }
            Err(ControllerError::Reconcile(e))
        }
    }
}

async fn finalize(obj: &NodeConfiguration, ctx: &WatchContext) -> Result<Action, ControllerError> {
    let name = obj.name_any();
    if !host::has_finalizer(obj) {
        return Ok(Action::await_change());
    }

    match host::cleanup(&ctx.reconciler, &ctx.timeouts, &obj.spec, obj.status.as_ref()).await? {
        Some(DeleteOutcome::ProtectedDefault) => warn!(
            "NodeConfiguration {} points at the cluster default; releasing it without deleting",
            name
        ),
        Some(outcome) => info!("NodeConfiguration {} cleaned up: {:?}", name, outcome),
        None => {}
    }

    patch_finalizers(&ctx.api, &name, host::finalizers_without(obj)).await?;
    Ok(Action::await_change())
}

async fn patch_finalizers(
    api: &Api<NodeConfiguration>,
    name: &str,
    finalizers: Vec<String>,
) -> Result<(), ControllerError> {
    let patch = json!({
        "metadata": {
            "finalizers": finalizers
        }
    });
    api.patch(name, &PatchParams::apply(FIELD_MANAGER), &Patch::Merge(&patch))
        .await?;
    Ok(())
}

async fn write_status(
    api: &Api<NodeConfiguration>,
    name: &str,
    current: Option<&NodeConfigurationStatus>,
    next: &NodeConfigurationStatus,
) -> Result<(), ControllerError> {
    if !host::status_needs_update(current, next) {
        debug!("NodeConfiguration {} status unchanged, skipping update", name);
        return Ok(());
    }
    let patch = host::status_patch(current, next);
    api.patch_status(name, &PatchParams::default(), &Patch::Merge(&patch))
        .await?;
    info!(
        "Updated NodeConfiguration {} status to {}",
        name,
        next.state.as_str()
    );
    Ok(())
}
