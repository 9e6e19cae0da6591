//! Fleet API models
//!
//! These models match the node configuration API serializers
//! (`/v1/kubernetes/clusters/{clusterId}/node-configurations`).
//! Every optional field is skipped when absent so the server's own
//! defaulting applies; nothing is ever sent as an explicit `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Values the server fills in when a request omits the field.
pub mod defaults {
    pub const DISK_CPU_RATIO: i32 = 0;
    pub const MIN_DISK_SIZE: i32 = 100;
    pub const EKS_IMDS_V1: bool = true;
    pub const EKS_IMDS_HOP_LIMIT: i32 = 2;
    pub const AKS_MAX_PODS_PER_NODE: i32 = 30;
    pub const GKE_MAX_PODS_PER_NODE: i32 = 110;
}

/// Node configuration as returned by get/list/create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    /// The cluster's protected default configuration; the API refuses to delete it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_cpu_ratio: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_disk_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eks: Option<EksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aks: Option<AksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kops: Option<KopsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gke: Option<GkeConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>, // ISO 8601 datetime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>, // ISO 8601 datetime
}

/// List response wrapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfigurationList {
    #[serde(default)]
    pub items: Vec<NodeConfiguration>,
}

/// Request body for creating a node configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNodeConfiguration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_cpu_ratio: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_disk_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eks: Option<EksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aks: Option<AksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kops: Option<KopsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gke: Option<GkeConfig>,
}

/// Request body for updating a node configuration.
///
/// Carries no `name`: the name is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfigurationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_cpu_ratio: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_disk_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubelet_config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eks: Option<EksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aks: Option<AksConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kops: Option<KopsConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gke: Option<GkeConfig>,
}

/// Instance tags. The API models them as an object whose entries all live
/// in an additional-properties bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(flatten)]
    pub additional_properties: BTreeMap<String, String>,
}

/// EKS specific settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EksConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<String>>,
    #[serde(default)]
    pub instance_profile_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_cluster_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_iops: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_throughput: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imds_v1: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imds_hop_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_kms_key_arn: Option<String>,
}

/// AKS specific settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AksConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pods_per_node: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_disk_type: Option<AksOsDiskType>,
}

/// AKS managed OS disk type.
///
/// Values the client does not know about are kept verbatim in
/// `Unrecognized` instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AksOsDiskType {
    #[serde(rename = "OS_DISK_TYPE_STANDARD")]
    Standard,
    #[serde(rename = "OS_DISK_TYPE_STANDARD_SSD")]
    StandardSsd,
    #[serde(rename = "OS_DISK_TYPE_PREMIUM_SSD")]
    PremiumSsd,
    #[serde(untagged)]
    Unrecognized(String),
}

/// KOPS specific settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KopsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair_id: Option<String>,
}

/// GKE specific settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GkeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pods_per_node: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
}
