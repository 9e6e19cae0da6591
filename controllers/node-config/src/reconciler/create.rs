use super::{Applied, Reconciler, remote_call};
use crate::context::OperationContext;
use crate::error::ReconcileError;
use crate::translator;
use crds::NodeConfigurationSpec;
use tracing::info;

impl Reconciler {
    /// Create the declared configuration and return the server's normalized view.
    pub async fn create(
        &self,
        ctx: &OperationContext,
        declared: &NodeConfigurationSpec,
    ) -> Result<Applied, ReconcileError> {
        let request = translator::to_create_request(declared)?;
        let cluster_id = declared.cluster_id.as_str();

        info!(
            "Creating node configuration {} in cluster {}",
            declared.name, cluster_id
        );
        let created = remote_call(
            ctx,
            "create",
            self.client.create_configuration(cluster_id, &request),
        )
        .await?;

        let id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ReconcileError::Consistency(format!(
                    "create of node configuration {} returned no id",
                    declared.name
                ))
            })?;
        info!("Created node configuration {} with id {}", declared.name, id);

        let state = self.read_after_write(ctx, cluster_id, &id).await?;
        Ok(Applied { id, state })
    }
}
