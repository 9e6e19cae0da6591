//! NodeConfiguration Custom Resource Definition
//!
//! Declares the desired shape of a cluster's node-provisioning configuration.
//! The spec is also the declared-state value the reconciler reads and writes
//! back, so every field carries explicit optionality.

use crate::provider::{AksConfig, EksConfig, GkeConfig, KopsConfig, ProviderConfig};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// NodeConfigurationSpec defines the desired state of a node configuration
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "fleet.nodeconfig.io",
    version = "v1alpha1",
    kind = "NodeConfiguration",
    namespaced,
    status = "NodeConfigurationStatus",
    shortname = "nodeconfig"
)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfigurationSpec {
    /// Cluster the configuration belongs to. Immutable after creation.
    pub cluster_id: String,

    /// Name of the node configuration. Immutable after creation.
    pub name: String,

    /// GiB of disk added for every CPU on the node (server default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_cpu_ratio: Option<i32>,

    /// Minimal disk size in GiB, 30..=1000 (server default 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_disk_size: Option<i32>,

    /// Subnet ids for provisioned nodes; order is significant to the API
    #[serde(default)]
    pub subnets: Vec<String>,

    /// Base64 encoded SSH public key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,

    /// Image used while provisioning the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Base64 encoded script run on the instance at launch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_script: Option<String>,

    /// `dockerd` or `containerd`, compared case-insensitively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_runtime: Option<String>,

    /// Docker daemon overrides as a JSON object, kept as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_config: Option<String>,

    /// Kubelet overrides as a JSON object, kept as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet_config: Option<String>,

    /// Tags added to cloud instances
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eks: Option<EksConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aks: Option<AksConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kops: Option<KopsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gke: Option<GkeConfig>,
}

impl NodeConfigurationSpec {
    /// Names of the provider blocks that are populated, in declaration order.
    pub fn populated_providers(&self) -> Vec<&'static str> {
        [
            ("eks", self.eks.is_some()),
            ("aks", self.aks.is_some()),
            ("kops", self.kops.is_some()),
            ("gke", self.gke.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Replace whatever provider block is populated with `provider`.
    pub fn set_provider(&mut self, provider: Option<ProviderConfig>) {
        self.eks = None;
        self.aks = None;
        self.kops = None;
        self.gke = None;
        match provider {
            Some(ProviderConfig::Eks(eks)) => self.eks = Some(eks),
            Some(ProviderConfig::Aks(aks)) => self.aks = Some(aks),
            Some(ProviderConfig::Kops(kops)) => self.kops = Some(kops),
            Some(ProviderConfig::Gke(gke)) => self.gke = Some(gke),
            None => {}
        }
    }
}

/// NodeConfigurationStatus defines the observed state of a node configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfigurationStatus {
    /// Identifier assigned by the fleet API on creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,

    /// Current state of the configuration
    #[serde(default)]
    pub state: ResourceState,

    /// Last-known state, as normalized by the fleet API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<NodeConfigurationSpec>,

    /// Error message if reconciliation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Last reconciliation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reconciled: Option<chrono::DateTime<chrono::Utc>>,
}

/// Resource reconciliation state
///
/// Serializes as PascalCase ("Created", "Failed", etc.) but also accepts
/// lowercase on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum ResourceState {
    #[default]
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "created")]
    Created,
    #[serde(alias = "updated")]
    Updated,
    #[serde(alias = "failed")]
    Failed,
}

impl ResourceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceState::Pending => "Pending",
            ResourceState::Created => "Created",
            ResourceState::Updated => "Updated",
            ResourceState::Failed => "Failed",
        }
    }
}
