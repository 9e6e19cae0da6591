use super::{DeleteOutcome, Reconciler, remote_call};
use crate::context::OperationContext;
use crate::error::ReconcileError;
use tracing::{info, warn};

impl Reconciler {
    /// Delete configuration `id`.
    ///
    /// Looks the configuration up first: an absent one is already deleted, and
    /// the cluster's default configuration is left alone with a warning.
    pub async fn delete(
        &self,
        ctx: &OperationContext,
        cluster_id: &str,
        id: &str,
    ) -> Result<DeleteOutcome, ReconcileError> {
        let existing = match remote_call(ctx, "delete", self.client.get_configuration(cluster_id, id)).await {
            Ok(existing) => existing,
            Err(e) if e.is_remote_not_found() => {
                info!(
                    "Node configuration {} in cluster {} already gone, nothing to delete",
                    id, cluster_id
                );
                return Ok(DeleteOutcome::AlreadyAbsent);
            }
            Err(e) => return Err(e),
        };

        if existing.default.unwrap_or(false) {
            warn!(
                "Node configuration {} ({}) is the default of cluster {} and cannot be deleted, skipping",
                id,
                existing.name.as_deref().unwrap_or("<unnamed>"),
                cluster_id
            );
            return Ok(DeleteOutcome::ProtectedDefault);
        }

        remote_call(ctx, "delete", self.client.delete_configuration(cluster_id, id)).await?;
        info!("Deleted node configuration {} in cluster {}", id, cluster_id);
        Ok(DeleteOutcome::Deleted)
    }
}
