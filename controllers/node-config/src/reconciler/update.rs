use super::{Reconciler, UpdateOutcome, remote_call};
use crate::changes::changed_fields;
use crate::context::OperationContext;
use crate::error::ReconcileError;
use crate::translator;
use crds::NodeConfigurationSpec;
use tracing::{debug, info};

impl Reconciler {
    /// Bring configuration `id` in line with `declared`.
    ///
    /// `last_known` is the remote-normalized state from the previous read or
    /// write. When no mutable field differs, no request is sent.
    pub async fn update(
        &self,
        ctx: &OperationContext,
        id: &str,
        last_known: &NodeConfigurationSpec,
        declared: &NodeConfigurationSpec,
    ) -> Result<UpdateOutcome, ReconcileError> {
        if declared.cluster_id != last_known.cluster_id {
            return Err(ReconcileError::validation(
                "clusterId",
                format!(
                    "cannot change from {:?} to {:?} after creation",
                    last_known.cluster_id, declared.cluster_id
                ),
            ));
        }
        if declared.name != last_known.name {
            return Err(ReconcileError::validation(
                "name",
                format!(
                    "cannot change from {:?} to {:?} after creation",
                    last_known.name, declared.name
                ),
            ));
        }

        let request = translator::to_update_request(declared)?;
        let changed = changed_fields(declared, last_known);
        if changed.is_empty() {
            debug!("Node configuration {} unchanged, skipping update", id);
            return Ok(UpdateOutcome::Unchanged(last_known.clone()));
        }

        info!(
            "Updating node configuration {} in cluster {} (changed: {})",
            id,
            declared.cluster_id,
            changed.join(", ")
        );
        remote_call(
            ctx,
            "update",
            self.client
                .update_configuration(&declared.cluster_id, id, &request),
        )
        .await?;

        let state = self.read_after_write(ctx, &declared.cluster_id, id).await?;
        Ok(UpdateOutcome::Updated(state))
    }
}
