//! GKE variant

use crate::error::ReconcileError;
use crate::validation;
use crds::GkeConfig;
use fleet_client::models;

const DISK_TYPES: &[&str] = &["pd-standard", "pd-balanced", "pd-ssd", "pd-extreme"];
const MAX_NETWORK_TAGS: usize = 64;

pub fn encode(gke: &GkeConfig) -> Result<models::GkeConfig, ReconcileError> {
    if let Some(max_pods) = gke.max_pods_per_node {
        validation::between("gke.maxPodsPerNode", max_pods, 10, 256)?;
    }
    if let Some(tags) = &gke.network_tags {
        validation::max_len("gke.networkTags", tags, MAX_NETWORK_TAGS)?;
    }
    if let Some(disk_type) = &gke.disk_type {
        validation::one_of("gke.diskType", disk_type, DISK_TYPES, false)?;
    }
    Ok(models::GkeConfig {
        max_pods_per_node: gke.max_pods_per_node,
        network_tags: gke.network_tags.clone(),
        disk_type: gke.disk_type.clone(),
    })
}

pub fn decode(wire: &models::GkeConfig) -> GkeConfig {
    GkeConfig {
        max_pods_per_node: wire.max_pods_per_node,
        network_tags: wire.network_tags.clone(),
        disk_type: wire.disk_type.clone(),
    }
}
