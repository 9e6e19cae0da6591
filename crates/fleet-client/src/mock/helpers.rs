//! Helper functions for the mock: server-side defaulting and model builders

use super::Endpoint;
use crate::models::*;

/// Per-endpoint call counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockCalls {
    pub list: usize,
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
}

impl MockCalls {
    pub(crate) fn record(&mut self, endpoint: Endpoint) {
        match endpoint {
            Endpoint::List => self.list += 1,
            Endpoint::Get => self.get += 1,
            Endpoint::Create => self.create += 1,
            Endpoint::Update => self.update += 1,
            Endpoint::Delete => self.delete += 1,
        }
    }

    /// Total number of calls that would have reached the network
    pub fn total(&self) -> usize {
        self.list + self.get + self.create + self.update + self.delete
    }
}

/// A minimal stored configuration, as the server would report it
pub fn sample_configuration(name: &str) -> NodeConfiguration {
    NodeConfiguration {
        name: Some(name.to_string()),
        version: Some(1),
        default: Some(false),
        disk_cpu_ratio: Some(defaults::DISK_CPU_RATIO),
        min_disk_size: Some(defaults::MIN_DISK_SIZE),
        subnets: Some(vec!["subnet-1".to_string()]),
        tags: Some(Tags::default()),
        ..Default::default()
    }
}

/// Build the stored representation of a freshly created configuration,
/// filling server defaults the request left out.
pub(crate) fn created_from(request: &NewNodeConfiguration) -> NodeConfiguration {
    let now = chrono::Utc::now().to_rfc3339();
    NodeConfiguration {
        id: Some(uuid::Uuid::new_v4().to_string()),
        name: Some(request.name.clone()),
        version: Some(1),
        default: Some(false),
        disk_cpu_ratio: Some(request.disk_cpu_ratio.unwrap_or(defaults::DISK_CPU_RATIO)),
        min_disk_size: Some(request.min_disk_size.unwrap_or(defaults::MIN_DISK_SIZE)),
        subnets: Some(request.subnets.clone().unwrap_or_default()),
        ssh_public_key: request.ssh_public_key.clone(),
        image: request.image.clone(),
        init_script: request.init_script.clone(),
        container_runtime: request.container_runtime.clone(),
        docker_config: request.docker_config.clone(),
        kubelet_config: request.kubelet_config.clone(),
        tags: Some(request.tags.clone().unwrap_or_default()),
        eks: request.eks.clone().map(default_eks),
        aks: request.aks.clone().map(default_aks),
        kops: request.kops.clone(),
        gke: request.gke.clone().map(default_gke),
        created_at: Some(now.clone()),
        updated_at: Some(now),
    }
}

/// Apply an update the way the server does: the payload replaces the
/// mutable fields, omitted fields fall back to server defaults.
pub(crate) fn apply_update(stored: &mut NodeConfiguration, request: &NodeConfigurationUpdate) {
    stored.version = Some(stored.version.unwrap_or(0) + 1);
    stored.disk_cpu_ratio = Some(request.disk_cpu_ratio.unwrap_or(defaults::DISK_CPU_RATIO));
    stored.min_disk_size = Some(request.min_disk_size.unwrap_or(defaults::MIN_DISK_SIZE));
    if let Some(subnets) = &request.subnets {
        stored.subnets = Some(subnets.clone());
    }
    stored.ssh_public_key = request.ssh_public_key.clone();
    stored.image = request.image.clone();
    stored.init_script = request.init_script.clone();
    stored.container_runtime = request.container_runtime.clone();
    stored.docker_config = request.docker_config.clone();
    stored.kubelet_config = request.kubelet_config.clone();
    stored.tags = Some(request.tags.clone().unwrap_or_default());
    stored.eks = request.eks.clone().map(default_eks);
    stored.aks = request.aks.clone().map(default_aks);
    stored.kops = request.kops.clone();
    stored.gke = request.gke.clone().map(default_gke);
    stored.updated_at = Some(chrono::Utc::now().to_rfc3339());
}

fn default_eks(mut eks: EksConfig) -> EksConfig {
    eks.imds_v1.get_or_insert(defaults::EKS_IMDS_V1);
    eks.imds_hop_limit.get_or_insert(defaults::EKS_IMDS_HOP_LIMIT);
    eks
}

fn default_aks(mut aks: AksConfig) -> AksConfig {
    aks.max_pods_per_node.get_or_insert(defaults::AKS_MAX_PODS_PER_NODE);
    aks
}

fn default_gke(mut gke: GkeConfig) -> GkeConfig {
    gke.max_pods_per_node.get_or_insert(defaults::GKE_MAX_PODS_PER_NODE);
    gke
}
