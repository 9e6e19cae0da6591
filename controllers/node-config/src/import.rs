//! Identity resolution for importing existing node configurations.

use crate::context::OperationContext;
use crate::error::ReconcileError;
use fleet_client::NodeConfigurationApi;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Import key of the form `<clusterId>/<nameOrId>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportKey {
    pub cluster_id: String,
    pub name_or_id: String,
}

impl ImportKey {
    pub fn parse(key: &str) -> Result<Self, ReconcileError> {
        let segments: Vec<&str> = key.split('/').collect();
        match segments.as_slice() {
            [cluster_id, name_or_id] if !cluster_id.is_empty() && !name_or_id.is_empty() => Ok(Self {
                cluster_id: cluster_id.to_string(),
                name_or_id: name_or_id.to_string(),
            }),
            _ => Err(ReconcileError::validation(
                "importKey",
                format!("expected \"<clusterId>/<nameOrId>\", got {:?}", key),
            )),
        }
    }
}

impl fmt::Display for ImportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cluster_id, self.name_or_id)
    }
}

/// Resolves a name-or-id token to a configuration id.
pub struct IdentityResolver {
    client: Arc<dyn NodeConfigurationApi>,
}

impl IdentityResolver {
    pub fn new(client: Arc<dyn NodeConfigurationApi>) -> Self {
        Self { client }
    }

    /// A UUID-shaped token is returned as-is without a remote call. Any other
    /// token is matched against configuration names (exact, case-sensitive);
    /// the first listed match that carries an id wins.
    pub async fn resolve(
        &self,
        ctx: &OperationContext,
        cluster_id: &str,
        token: &str,
    ) -> Result<String, ReconcileError> {
        if Uuid::parse_str(token).is_ok() {
            debug!("Import token {} is an id, using it directly", token);
            return Ok(token.to_string());
        }

        let configurations = ctx
            .guard("list", self.client.list_configurations(cluster_id))
            .await??;
        let id = configurations
            .into_iter()
            .filter(|c| c.name.as_deref() == Some(token))
            .find_map(|c| c.id.filter(|id| !id.is_empty()))
            .ok_or_else(|| ReconcileError::NotFound(token.to_string()))?;

        debug!("Resolved node configuration name {} to id {}", token, id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_client::{MockFleetClient, sample_configuration};

    const ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_parse_import_key() {
        let key = ImportKey::parse("c1/default-pool").unwrap();
        assert_eq!(key.cluster_id, "c1");
        assert_eq!(key.name_or_id, "default-pool");
        assert_eq!(key.to_string(), "c1/default-pool");

        for bad in ["c1", "c1/", "/pool", "c1/pool/extra", ""] {
            assert!(
                matches!(ImportKey::parse(bad), Err(ReconcileError::Validation { .. })),
                "{bad:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_uuid_token_skips_listing() {
        let mock = MockFleetClient::new("http://fleet.test");
        let resolver = IdentityResolver::new(Arc::new(mock.clone()));

        let id = resolver
            .resolve(&OperationContext::unbounded(), "c1", ID)
            .await
            .unwrap();
        assert_eq!(id, ID);
        assert_eq!(mock.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_name_token_lists_cluster() {
        let mock = MockFleetClient::new("http://fleet.test");
        mock.add_configuration("c2", sample_configuration("default-pool"));
        let expected = mock.add_configuration("c1", sample_configuration("default-pool"));
        mock.add_configuration("c1", sample_configuration("other"));
        let resolver = IdentityResolver::new(Arc::new(mock.clone()));

        let id = resolver
            .resolve(&OperationContext::unbounded(), "c1", "default-pool")
            .await
            .unwrap();
        assert_eq!(id, expected);
        assert_eq!(mock.calls().list, 1);
    }

    #[tokio::test]
    async fn test_name_match_without_id_is_skipped() {
        let mock = MockFleetClient::new("http://fleet.test");
        let mut broken = sample_configuration("default-pool");
        broken.id = Some(String::new());
        mock.add_configuration("c1", broken);
        let expected = mock.add_configuration("c1", sample_configuration("default-pool"));
        let resolver = IdentityResolver::new(Arc::new(mock));

        let id = resolver
            .resolve(&OperationContext::unbounded(), "c1", "default-pool")
            .await
            .unwrap();
        assert_eq!(id, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_listing_hits_deadline() {
        let mock = MockFleetClient::new("http://fleet.test");
        mock.add_configuration("c1", sample_configuration("default-pool"));
        mock.delay_endpoint(fleet_client::Endpoint::List, std::time::Duration::from_secs(30));
        let resolver = IdentityResolver::new(Arc::new(mock));
        let ctx = OperationContext::with_timeout(std::time::Duration::from_secs(5));

        let err = resolver.resolve(&ctx, "c1", "default-pool").await.unwrap_err();
        assert!(matches!(
            err,
            ReconcileError::DeadlineExceeded { operation: "list" }
        ));
    }

    #[tokio::test]
    async fn test_name_match_is_case_sensitive() {
        let mock = MockFleetClient::new("http://fleet.test");
        mock.add_configuration("c1", sample_configuration("Default-Pool"));
        let resolver = IdentityResolver::new(Arc::new(mock));

        let err = resolver
            .resolve(&OperationContext::unbounded(), "c1", "default-pool")
            .await
            .unwrap_err();
        match err {
            ReconcileError::NotFound(token) => assert_eq!(token, "default-pool"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_failure_surfaces_remote_error() {
        let mock = MockFleetClient::new("http://fleet.test");
        mock.fail_endpoint(fleet_client::Endpoint::List, 503, "unavailable");
        let resolver = IdentityResolver::new(Arc::new(mock));

        let err = resolver
            .resolve(&OperationContext::unbounded(), "c1", "pool")
            .await
            .unwrap_err();
        assert!(matches!(err, ReconcileError::RemoteApi { status: 503, .. }));
    }
}
