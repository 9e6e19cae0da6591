//! Kubernetes host adapter helpers
//!
//! Decides which reconciler operation a `NodeConfiguration` object needs and
//! builds the status that results. The watch loop in the binary does the
//! Kubernetes I/O around these.

use crate::config::Timeouts;
use crate::context::OperationContext;
use crate::error::ReconcileError;
use crate::import::ImportKey;
use crate::reconciler::{DeleteOutcome, ReadOutcome, Reconciler, UpdateOutcome};
use crds::{NodeConfiguration, NodeConfigurationSpec, NodeConfigurationStatus, ResourceState};
use serde_json::{Value, json};
use tracing::{debug, info};

/// Finalizer that keeps the object around until the remote configuration is deleted
pub const FINALIZER: &str = "fleet.nodeconfig.io/cleanup";

/// Annotation carrying an import key (`<clusterId>/<nameOrId>`)
pub const IMPORT_ANNOTATION: &str = "fleet.nodeconfig.io/import";

/// Import key requested through the annotation, if any
pub fn import_key(obj: &NodeConfiguration) -> Option<&str> {
    obj.metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(IMPORT_ANNOTATION))
        .map(String::as_str)
        .filter(|key| !key.trim().is_empty())
}

pub fn has_finalizer(obj: &NodeConfiguration) -> bool {
    obj.metadata
        .finalizers
        .as_ref()
        .is_some_and(|f| f.iter().any(|name| name == FINALIZER))
}

/// Finalizer list with ours added
pub fn finalizers_with(obj: &NodeConfiguration) -> Vec<String> {
    let mut finalizers = obj.metadata.finalizers.clone().unwrap_or_default();
    if !finalizers.iter().any(|f| f == FINALIZER) {
        finalizers.push(FINALIZER.to_string());
    }
    finalizers
}

/// Finalizer list with ours removed
pub fn finalizers_without(obj: &NodeConfiguration) -> Vec<String> {
    obj.metadata
        .finalizers
        .iter()
        .flatten()
        .filter(|f| *f != FINALIZER)
        .cloned()
        .collect()
}

/// Run whichever operation brings the remote configuration in line with `spec`.
pub async fn converge(
    reconciler: &Reconciler,
    timeouts: &Timeouts,
    spec: &NodeConfigurationSpec,
    current: Option<&NodeConfigurationStatus>,
    import: Option<&str>,
) -> Result<NodeConfigurationStatus, ReconcileError> {
    let configuration_id = current.and_then(|s| s.configuration_id.as_deref());

    let Some(id) = configuration_id else {
        if let Some(key) = import {
            return adopt(reconciler, timeouts, spec, key).await;
        }
        let ctx = OperationContext::with_timeout(timeouts.create);
        let applied = reconciler.create(&ctx, spec).await?;
        return Ok(applied_status(applied.id, ResourceState::Created, applied.state));
    };

    let cluster_id = bound_cluster_id(spec, current);
    if spec.cluster_id != cluster_id {
        return Err(ReconcileError::validation(
            "clusterId",
            format!(
                "cannot change from {:?} to {:?} after creation",
                cluster_id, spec.cluster_id
            ),
        ));
    }

    let ctx = OperationContext::with_timeout(timeouts.read);
    let known = match reconciler.read(&ctx, cluster_id, id).await? {
        ReadOutcome::Present(known) => known,
        ReadOutcome::Removed => return Ok(NodeConfigurationStatus::default()),
    };

    let ctx = OperationContext::with_timeout(timeouts.update);
    match reconciler.update(&ctx, id, &known, spec).await? {
        UpdateOutcome::Unchanged(state) => {
            let kept = match current.map(|s| s.state) {
                Some(ResourceState::Updated) => ResourceState::Updated,
                _ => ResourceState::Created,
            };
            Ok(applied_status(id.to_string(), kept, state))
        }
        UpdateOutcome::Updated(state) => Ok(applied_status(id.to_string(), ResourceState::Updated, state)),
    }
}

async fn adopt(
    reconciler: &Reconciler,
    timeouts: &Timeouts,
    spec: &NodeConfigurationSpec,
    key: &str,
) -> Result<NodeConfigurationStatus, ReconcileError> {
    let parsed = ImportKey::parse(key)?;
    if parsed.cluster_id != spec.cluster_id {
        return Err(ReconcileError::validation(
            "importKey",
            format!(
                "cluster {} does not match spec.clusterId {}",
                parsed.cluster_id, spec.cluster_id
            ),
        ));
    }

    let ctx = OperationContext::with_timeout(timeouts.read);
    let imported = reconciler.import(&ctx, key).await?;

    let ctx = OperationContext::with_timeout(timeouts.read);
    match reconciler.read(&ctx, &imported.cluster_id, &imported.id).await? {
        ReadOutcome::Present(state) => {
            info!("Adopted node configuration {} ({})", imported.id, key);
            Ok(applied_status(imported.id, ResourceState::Created, state))
        }
        ReadOutcome::Removed => Err(ReconcileError::NotFound(key.to_string())),
    }
}

/// Delete the remote configuration behind `status`, if any.
pub async fn cleanup(
    reconciler: &Reconciler,
    timeouts: &Timeouts,
    spec: &NodeConfigurationSpec,
    current: Option<&NodeConfigurationStatus>,
) -> Result<Option<DeleteOutcome>, ReconcileError> {
    let Some(id) = current.and_then(|s| s.configuration_id.as_deref()) else {
        debug!("Node configuration {} was never created, nothing to clean up", spec.name);
        return Ok(None);
    };
    let ctx = OperationContext::with_timeout(timeouts.delete);
    reconciler
        .delete(&ctx, bound_cluster_id(spec, current), id)
        .await
        .map(Some)
}

/// Cluster the recorded configuration lives in.
///
/// `observed` always carries the cluster the configuration was created or
/// adopted in, even after `spec.clusterId` is edited.
fn bound_cluster_id<'a>(spec: &'a NodeConfigurationSpec, current: Option<&'a NodeConfigurationStatus>) -> &'a str {
    current
        .and_then(|s| s.observed.as_ref())
        .map(|observed| observed.cluster_id.as_str())
        .filter(|cluster_id| !cluster_id.is_empty())
        .unwrap_or(&spec.cluster_id)
}

fn applied_status(id: String, state: ResourceState, observed: NodeConfigurationSpec) -> NodeConfigurationStatus {
    NodeConfigurationStatus {
        configuration_id: Some(id),
        state,
        observed: Some(observed),
        error: None,
        last_reconciled: Some(chrono::Utc::now()),
    }
}

/// Status recording a failed reconcile; the last known id and observed state are kept.
pub fn failed_status(current: Option<&NodeConfigurationStatus>, error: &ReconcileError) -> NodeConfigurationStatus {
    let mut status = current.cloned().unwrap_or_default();
    status.state = ResourceState::Failed;
    status.error = Some(error.to_string());
    status.last_reconciled = Some(chrono::Utc::now());
    status
}

/// Whether writing `next` would change anything besides the timestamp.
pub fn status_needs_update(current: Option<&NodeConfigurationStatus>, next: &NodeConfigurationStatus) -> bool {
    match current {
        None => true,
        Some(current) => {
            current.configuration_id != next.configuration_id
                || current.state != next.state
                || current.observed != next.observed
                || current.error != next.error
        }
    }
}

/// Merge patch that turns `current` into `next`.
///
/// A merge patch only removes keys it sets to null, so every key present in
/// `current` but gone from `next` is nulled explicitly, nested ones included.
pub fn status_patch(current: Option<&NodeConfigurationStatus>, next: &NodeConfigurationStatus) -> Value {
    let mut body = status_body(next);
    if let Some(current) = current {
        null_removed_keys(&status_body(current), &mut body);
    }
    json!({ "status": body })
}

fn status_body(status: &NodeConfigurationStatus) -> Value {
    json!({
        "configurationId": status.configuration_id,
        "state": status.state.as_str(),
        "observed": status.observed,
        "error": status.error,
        "lastReconciled": status.last_reconciled,
    })
}

fn null_removed_keys(previous: &Value, next: &mut Value) {
    let (Value::Object(previous), Value::Object(next)) = (previous, next) else {
        return;
    };
    for (key, old) in previous {
        match next.get_mut(key) {
            Some(new) => null_removed_keys(old, new),
            None => {
                next.insert(key.clone(), Value::Null);
            }
        }
    }
}
