use super::{ReadOutcome, Reconciler, remote_call};
use crate::context::OperationContext;
use crate::error::ReconcileError;
use crate::translator;
use crds::NodeConfigurationSpec;
use tracing::{debug, warn};

impl Reconciler {
    /// Fetch the remote state of `id`.
    ///
    /// A 404 here means the configuration was deleted out-of-band and is
    /// reported as `Removed` so the caller can drop its record.
    pub async fn read(
        &self,
        ctx: &OperationContext,
        cluster_id: &str,
        id: &str,
    ) -> Result<ReadOutcome, ReconcileError> {
        match self.fetch(ctx, cluster_id, id).await {
            Ok(state) => Ok(ReadOutcome::Present(state)),
            Err(e) if e.is_remote_not_found() => {
                warn!(
                    "Node configuration {} in cluster {} no longer exists, removing it from state",
                    id, cluster_id
                );
                Ok(ReadOutcome::Removed)
            }
            Err(e) => Err(e),
        }
    }

    /// Re-read right after a create or update. The id was just handed out by
    /// the server, so a 404 is a consistency failure rather than drift.
    pub(crate) async fn read_after_write(
        &self,
        ctx: &OperationContext,
        cluster_id: &str,
        id: &str,
    ) -> Result<NodeConfigurationSpec, ReconcileError> {
        match self.fetch(ctx, cluster_id, id).await {
            Err(e) if e.is_remote_not_found() => Err(ReconcileError::Consistency(format!(
                "node configuration {} in cluster {} was written but cannot be read back",
                id, cluster_id
            ))),
            other => other,
        }
    }

    async fn fetch(
        &self,
        ctx: &OperationContext,
        cluster_id: &str,
        id: &str,
    ) -> Result<NodeConfigurationSpec, ReconcileError> {
        debug!("Reading node configuration {} in cluster {}", id, cluster_id);
        let wire = remote_call(ctx, "read", self.client.get_configuration(cluster_id, id)).await?;
        translator::from_wire(cluster_id, &wire)
    }
}
