//! Change detection over the mutable field set.
//!
//! `name` and `clusterId` are immutable and never compared here. Fields the
//! server defaults are compared with the default substituted on both sides,
//! so an omitted field and the server's filled-in value count as equal.

use crate::translator::parse_json_object;
use crds::{AksConfig, EksConfig, GkeConfig, NodeConfigurationSpec};
use fleet_client::models::defaults;
use serde_json::{Map, Value};

/// Names of the mutable fields that differ between `declared` and `known`.
pub fn changed_fields(declared: &NodeConfigurationSpec, known: &NodeConfigurationSpec) -> Vec<&'static str> {
    let mut changed = Vec::new();

    if declared.disk_cpu_ratio.unwrap_or(defaults::DISK_CPU_RATIO)
        != known.disk_cpu_ratio.unwrap_or(defaults::DISK_CPU_RATIO)
    {
        changed.push("diskCpuRatio");
    }
    if declared.min_disk_size.unwrap_or(defaults::MIN_DISK_SIZE)
        != known.min_disk_size.unwrap_or(defaults::MIN_DISK_SIZE)
    {
        changed.push("minDiskSize");
    }
    // Order matters to the API
    if declared.subnets != known.subnets {
        changed.push("subnets");
    }
    if text(&declared.ssh_public_key) != text(&known.ssh_public_key) {
        changed.push("sshPublicKey");
    }
    if text(&declared.image) != text(&known.image) {
        changed.push("image");
    }
    if text(&declared.init_script) != text(&known.init_script) {
        changed.push("initScript");
    }
    if !same_ignore_case(&declared.container_runtime, &known.container_runtime) {
        changed.push("containerRuntime");
    }
    if !same_json("dockerConfig", &declared.docker_config, &known.docker_config) {
        changed.push("dockerConfig");
    }
    if !same_json("kubeletConfig", &declared.kubelet_config, &known.kubelet_config) {
        changed.push("kubeletConfig");
    }
    if declared.tags != known.tags {
        changed.push("tags");
    }
    if !same_provider(declared, known) {
        changed.push("provider");
    }

    changed
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn same_ignore_case(a: &Option<String>, b: &Option<String>) -> bool {
    match (text(a), text(b)) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    }
}

fn same_json(field: &'static str, a: &Option<String>, b: &Option<String>) -> bool {
    match (parsed(field, a), parsed(field, b)) {
        (Some(a), Some(b)) => a == b,
        _ => text(a) == text(b),
    }
}

/// `None` when the text is not a JSON object; blank text parses to `Some(None)`.
fn parsed(field: &'static str, value: &Option<String>) -> Option<Option<Map<String, Value>>> {
    parse_json_object(field, value.as_deref()).ok()
}

fn same_provider(declared: &NodeConfigurationSpec, known: &NodeConfigurationSpec) -> bool {
    if declared.populated_providers() != known.populated_providers() {
        return false;
    }
    let eks = match (&declared.eks, &known.eks) {
        (Some(a), Some(b)) => normalized_eks(a) == normalized_eks(b),
        _ => true,
    };
    let aks = match (&declared.aks, &known.aks) {
        (Some(a), Some(b)) => normalized_aks(a) == normalized_aks(b),
        _ => true,
    };
    let kops = match (&declared.kops, &known.kops) {
        (Some(a), Some(b)) => text(&a.key_pair_id) == text(&b.key_pair_id),
        _ => true,
    };
    let gke = match (&declared.gke, &known.gke) {
        (Some(a), Some(b)) => normalized_gke(a) == normalized_gke(b),
        _ => true,
    };
    eks && aks && kops && gke
}

fn normalized_eks(eks: &EksConfig) -> EksConfig {
    let mut eks = eks.clone();
    eks.imds_v1 = Some(eks.imds_v1.unwrap_or(defaults::EKS_IMDS_V1));
    eks.imds_hop_limit = Some(eks.imds_hop_limit.unwrap_or(defaults::EKS_IMDS_HOP_LIMIT));
    eks.volume_type = eks.volume_type.map(|t| t.to_ascii_lowercase());
    for field in [
        &mut eks.dns_cluster_ip,
        &mut eks.key_pair_id,
        &mut eks.volume_type,
        &mut eks.volume_kms_key_arn,
    ] {
        if field.as_deref() == Some("") {
            *field = None;
        }
    }
    eks
}

fn normalized_aks(aks: &AksConfig) -> AksConfig {
    AksConfig {
        max_pods_per_node: Some(aks.max_pods_per_node.unwrap_or(defaults::AKS_MAX_PODS_PER_NODE)),
        os_disk_type: aks.os_disk_type,
    }
}

fn normalized_gke(gke: &GkeConfig) -> GkeConfig {
    GkeConfig {
        max_pods_per_node: Some(gke.max_pods_per_node.unwrap_or(defaults::GKE_MAX_PODS_PER_NODE)),
        network_tags: gke.network_tags.clone().filter(|tags| !tags.is_empty()),
        disk_type: gke.disk_type.clone().filter(|d| !d.is_empty()),
    }
}
