//! Cloud-provider specific node configuration blocks.
//!
//! The manifest declares at most one of `eks`, `aks`, `kops`, `gke`;
//! [`ProviderConfig`] is the in-memory sum type with exactly one active case.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The active provider variant of a node configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderConfig {
    Eks(EksConfig),
    Aks(AksConfig),
    Kops(KopsConfig),
    Gke(GkeConfig),
}

impl ProviderConfig {
    /// Field name of the variant in the declared and wire shapes
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderConfig::Eks(_) => "eks",
            ProviderConfig::Aks(_) => "aks",
            ProviderConfig::Kops(_) => "kops",
            ProviderConfig::Gke(_) => "gke",
        }
    }
}

/// EKS settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EksConfig {
    /// Security groups for provisioned nodes (at least one).
    ///
    /// A declaration must name at least one, so an empty list only ever
    /// appears in observed state and means the API reported none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,

    /// Instance profile ARN for provisioned nodes
    #[serde(default)]
    pub instance_profile_arn: String,

    /// IPv4 address used for DNS queries within the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_cluster_ip: Option<String>,

    /// AWS key pair id; takes priority over `sshPublicKey`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair_id: Option<String>,

    /// EBS volume type: gp3, io1 or io2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,

    /// EBS volume IOPS, 100..=100000
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_iops: Option<i32>,

    /// EBS volume throughput in MiB/s, 125..=1000
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_throughput: Option<i32>,

    /// When true both IMDSv1 and IMDSv2 stay enabled (server default true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imds_v1: Option<bool>,

    /// IMDSv2 hop limit, at least 2 (server default 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imds_hop_limit: Option<i32>,

    /// KMS key ARN used to encrypt the node's EBS volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_kms_key_arn: Option<String>,
}

/// AKS settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AksConfig {
    /// Maximum pods per node, 10..=250 (server default 30)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pods_per_node: Option<i32>,

    /// Managed OS disk type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_disk_type: Option<OsDiskType>,
}

/// AKS managed OS disk type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OsDiskType {
    Standard,
    StandardSsd,
    PremiumSsd,
}

/// KOPS settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KopsConfig {
    /// AWS key pair id; takes priority over `sshPublicKey`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pair_id: Option<String>,
}

/// GKE settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GkeConfig {
    /// Maximum pods per node, 10..=256 (server default 110)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pods_per_node: Option<i32>,

    /// Network tags added to the VM (at most 64)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tags: Option<Vec<String>>,

    /// Boot disk type: pd-standard, pd-balanced, pd-ssd or pd-extreme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
}
