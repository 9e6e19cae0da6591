//! Test utilities for unit testing the reconciler
//!
//! Declared-state builders and a reconciler wired to `MockFleetClient`.

use crate::context::OperationContext;
use crate::reconciler::Reconciler;
use crds::{EksConfig, NodeConfigurationSpec};
use fleet_client::MockFleetClient;
use std::time::Duration;

/// Declared spec with only the required fields set
pub fn base_spec(cluster_id: &str, name: &str) -> NodeConfigurationSpec {
    NodeConfigurationSpec {
        cluster_id: cluster_id.to_string(),
        name: name.to_string(),
        subnets: vec!["subnet-1".to_string()],
        ..Default::default()
    }
}

/// The `pool-a` EKS declaration: minDiskSize 50, one subnet, one security group
pub fn eks_spec(cluster_id: &str, name: &str) -> NodeConfigurationSpec {
    NodeConfigurationSpec {
        min_disk_size: Some(50),
        eks: Some(EksConfig {
            security_groups: vec!["sg-1".to_string()],
            instance_profile_arn: "arn:aws:iam::1:instance-profile/x".to_string(),
            ..Default::default()
        }),
        ..base_spec(cluster_id, name)
    }
}

/// Reconciler backed by a fresh mock; the returned mock shares its state
pub fn mock_reconciler() -> (MockFleetClient, Reconciler) {
    let mock = MockFleetClient::new("http://fleet.test");
    let reconciler = Reconciler::from_client(mock.clone());
    (mock, reconciler)
}

pub fn test_ctx() -> OperationContext {
    OperationContext::with_timeout(Duration::from_secs(60))
}
