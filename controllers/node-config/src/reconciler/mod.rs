//! Node configuration reconciler.
//!
//! Lifecycle operations against the fleet API:
//! - `create`: create, then re-read the server's normalized form
//! - `read`: fetch remote state; a configuration gone out-of-band reads as `Removed`
//! - `update`: no-op when no mutable field changed, otherwise update and re-read
//! - `delete`: skips absent configurations and the cluster's protected default
//! - `import`: resolve `<clusterId>/<nameOrId>` to an id
//!
//! Every remote call runs under the caller's `OperationContext`. Nothing is
//! retried and no state is kept between invocations.

mod create;
mod delete;
mod read;
mod update;

#[cfg(test)]
mod delete_test;

use crate::context::OperationContext;
use crate::error::ReconcileError;
use crate::import::{IdentityResolver, ImportKey};
use crds::NodeConfigurationSpec;
use fleet_client::{FleetError, NodeConfigurationApi};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};

/// Result of a successful create
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub id: String,
    /// Server-normalized state, as read back right after the write
    pub state: NodeConfigurationSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Present(NodeConfigurationSpec),
    /// The configuration no longer exists remotely; drop the local record
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Nothing tracked changed; no remote call was made
    Unchanged(NodeConfigurationSpec),
    Updated(NodeConfigurationSpec),
}

impl UpdateOutcome {
    pub fn state(&self) -> &NodeConfigurationSpec {
        match self {
            UpdateOutcome::Unchanged(state) | UpdateOutcome::Updated(state) => state,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
    /// The cluster's default configuration; the API refuses to delete it
    ProtectedDefault,
}

/// An existing configuration adopted through import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedConfiguration {
    pub cluster_id: String,
    pub id: String,
}

/// Reconciles declared node configurations against the fleet API.
pub struct Reconciler {
    pub(crate) client: Arc<dyn NodeConfigurationApi>,
    resolver: IdentityResolver,
}

impl Reconciler {
    pub fn new(client: Arc<dyn NodeConfigurationApi>) -> Self {
        let resolver = IdentityResolver::new(Arc::clone(&client));
        Self { client, resolver }
    }

    pub fn from_client(client: impl NodeConfigurationApi + 'static) -> Self {
        Self::new(Arc::new(client))
    }

    /// Resolve an import key to the configuration it names.
    pub async fn import(
        &self,
        ctx: &OperationContext,
        key: &str,
    ) -> Result<ImportedConfiguration, ReconcileError> {
        let key = ImportKey::parse(key)?;
        let id = self
            .resolver
            .resolve(ctx, &key.cluster_id, &key.name_or_id)
            .await?;
        info!("Imported node configuration {} as id {}", key, id);
        Ok(ImportedConfiguration {
            cluster_id: key.cluster_id,
            id,
        })
    }
}

/// Run one fleet API call under the context deadline.
///
/// Failures other than 404 are logged here; 404 handling is up to the caller.
pub(crate) async fn remote_call<T, F>(
    ctx: &OperationContext,
    operation: &'static str,
    call: F,
) -> Result<T, ReconcileError>
where
    F: Future<Output = Result<T, FleetError>>,
{
    ctx.guard(operation, call).await?.map_err(|e| {
        if !e.is_not_found() {
            error!("Fleet API {} failed: {}", operation, e);
        }
        ReconcileError::from(e)
    })
}
