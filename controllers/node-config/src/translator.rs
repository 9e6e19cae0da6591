//! Configuration translator
//!
//! Converts a declared `NodeConfigurationSpec` into create/update request
//! bodies and maps API responses back into the declared shape. All
//! validation happens here, before anything is sent.

use crate::codec::{self, WireVariants};
use crate::error::ReconcileError;
use crate::validation;
use crds::{NodeConfigurationSpec, ProviderConfig};
use fleet_client::models::{NewNodeConfiguration, NodeConfiguration, NodeConfigurationUpdate, Tags};
use serde_json::{Map, Value};
use tracing::debug;

const CONTAINER_RUNTIMES: &[&str] = &["dockerd", "containerd"];

/// Fold the four optional provider blocks into the active variant.
///
/// More than one populated block is rejected before reaching the wire.
pub fn active_provider(spec: &NodeConfigurationSpec) -> Result<Option<ProviderConfig>, ReconcileError> {
    let populated = spec.populated_providers();
    if populated.len() > 1 {
        return Err(ReconcileError::validation(
            "provider",
            format!(
                "only one of eks, aks, kops, gke may be set, found {}",
                populated.join(", ")
            ),
        ));
    }

    let provider = if let Some(eks) = &spec.eks {
        Some(ProviderConfig::Eks(eks.clone()))
    } else if let Some(aks) = &spec.aks {
        Some(ProviderConfig::Aks(aks.clone()))
    } else if let Some(kops) = &spec.kops {
        Some(ProviderConfig::Kops(kops.clone()))
    } else {
        spec.gke.clone().map(ProviderConfig::Gke)
    };
    Ok(provider)
}

/// Build the create request body.
pub fn to_create_request(spec: &NodeConfigurationSpec) -> Result<NewNodeConfiguration, ReconcileError> {
    let update = to_update_request(spec)?;
    debug!(
        "Built create request for node configuration {} in cluster {}",
        spec.name, spec.cluster_id
    );
    Ok(NewNodeConfiguration {
        name: spec.name.clone(),
        disk_cpu_ratio: update.disk_cpu_ratio,
        min_disk_size: update.min_disk_size,
        subnets: update.subnets,
        ssh_public_key: update.ssh_public_key,
        image: update.image,
        init_script: update.init_script,
        container_runtime: update.container_runtime,
        docker_config: update.docker_config,
        kubelet_config: update.kubelet_config,
        tags: update.tags,
        eks: update.eks,
        aks: update.aks,
        kops: update.kops,
        gke: update.gke,
    })
}

/// Build the update request body. Same coverage as create, without `name`.
pub fn to_update_request(spec: &NodeConfigurationSpec) -> Result<NodeConfigurationUpdate, ReconcileError> {
    validate_scalars(spec)?;
    let docker_config = parse_json_object("dockerConfig", spec.docker_config.as_deref())?;
    let kubelet_config = parse_json_object("kubeletConfig", spec.kubelet_config.as_deref())?;
    let provider = active_provider(spec)?;
    let variants = codec::encode(provider.as_ref())?;

    let tags = if spec.tags.is_empty() {
        None
    } else {
        Some(Tags {
            additional_properties: spec.tags.clone(),
        })
    };

    Ok(NodeConfigurationUpdate {
        disk_cpu_ratio: spec.disk_cpu_ratio,
        min_disk_size: spec.min_disk_size,
        subnets: Some(spec.subnets.clone()),
        ssh_public_key: spec.ssh_public_key.clone(),
        image: spec.image.clone(),
        init_script: spec.init_script.clone(),
        container_runtime: spec.container_runtime.clone(),
        docker_config,
        kubelet_config,
        tags,
        eks: variants.eks,
        aks: variants.aks,
        kops: variants.kops,
        gke: variants.gke,
    })
}

/// Map an API response back into the declared shape.
///
/// JSON sub-configs come back as canonical text (sorted keys, compact).
pub fn from_wire(cluster_id: &str, wire: &NodeConfiguration) -> Result<NodeConfigurationSpec, ReconcileError> {
    let variants = WireVariants {
        eks: wire.eks.clone(),
        aks: wire.aks.clone(),
        kops: wire.kops.clone(),
        gke: wire.gke.clone(),
    };
    let provider = codec::decode(&variants)?;

    let mut spec = NodeConfigurationSpec {
        cluster_id: cluster_id.to_string(),
        name: wire.name.clone().unwrap_or_default(),
        disk_cpu_ratio: wire.disk_cpu_ratio,
        min_disk_size: wire.min_disk_size,
        subnets: wire.subnets.clone().unwrap_or_default(),
        ssh_public_key: wire.ssh_public_key.clone(),
        image: wire.image.clone(),
        init_script: wire.init_script.clone(),
        container_runtime: wire.container_runtime.clone(),
        docker_config: wire.docker_config.as_ref().map(canonical_json),
        kubelet_config: wire.kubelet_config.as_ref().map(canonical_json),
        tags: wire
            .tags
            .as_ref()
            .map(|t| t.additional_properties.clone())
            .unwrap_or_default(),
        ..Default::default()
    };
    spec.set_provider(provider);
    Ok(spec)
}

/// Parse embedded JSON text into an object; blank text counts as absent.
pub fn parse_json_object(
    field: &'static str,
    text: Option<&str>,
) -> Result<Option<Map<String, Value>>, ReconcileError> {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(other) => Err(ReconcileError::ConfigParse {
            field,
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
        Err(e) => Err(ReconcileError::ConfigParse {
            field,
            message: e.to_string(),
        }),
    }
}

fn canonical_json(map: &Map<String, Value>) -> String {
    Value::Object(map.clone()).to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn validate_scalars(spec: &NodeConfigurationSpec) -> Result<(), ReconcileError> {
    validation::not_blank("clusterId", &spec.cluster_id)?;
    validation::not_blank("name", &spec.name)?;
    if let Some(ratio) = spec.disk_cpu_ratio {
        validation::at_least("diskCpuRatio", ratio, 0)?;
    }
    if let Some(size) = spec.min_disk_size {
        validation::between("minDiskSize", size, 30, 1000)?;
    }
    if spec.subnets.is_empty() {
        return Err(ReconcileError::validation("subnets", "at least one subnet is required"));
    }
    for subnet in &spec.subnets {
        validation::not_blank("subnets", subnet)?;
    }
    if let Some(key) = &spec.ssh_public_key {
        validation::base64("sshPublicKey", key)?;
    }
    if let Some(image) = &spec.image {
        validation::not_blank("image", image)?;
    }
    if let Some(script) = &spec.init_script {
        validation::base64("initScript", script)?;
    }
    if let Some(runtime) = &spec.container_runtime {
        validation::one_of("containerRuntime", runtime, CONTAINER_RUNTIMES, true)?;
    }
    Ok(())
}
