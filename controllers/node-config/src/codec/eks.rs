//! EKS variant

use crate::error::ReconcileError;
use crate::validation::{self, KEY_PAIR_ID, KMS_KEY_ARN};
use crds::EksConfig;
use fleet_client::models;

const VOLUME_TYPES: &[&str] = &["gp3", "io1", "io2"];

pub fn encode(eks: &EksConfig) -> Result<models::EksConfig, ReconcileError> {
    if eks.security_groups.is_empty() {
        return Err(ReconcileError::validation(
            "eks.securityGroups",
            "at least one security group is required",
        ));
    }
    for group in &eks.security_groups {
        validation::not_blank("eks.securityGroups", group)?;
    }
    validation::not_blank("eks.instanceProfileArn", &eks.instance_profile_arn)?;
    if let Some(ip) = &eks.dns_cluster_ip {
        validation::ipv4("eks.dnsClusterIp", ip)?;
    }
    if let Some(key_pair_id) = &eks.key_pair_id {
        validation::matches("eks.keyPairId", &KEY_PAIR_ID, key_pair_id)?;
    }
    if let Some(volume_type) = &eks.volume_type {
        validation::one_of("eks.volumeType", volume_type, VOLUME_TYPES, true)?;
    }
    if let Some(iops) = eks.volume_iops {
        validation::between("eks.volumeIops", iops, 100, 100_000)?;
    }
    if let Some(throughput) = eks.volume_throughput {
        validation::between("eks.volumeThroughput", throughput, 125, 1000)?;
    }
    if let Some(hop_limit) = eks.imds_hop_limit {
        validation::at_least("eks.imdsHopLimit", hop_limit, 2)?;
    }
    if let Some(arn) = &eks.volume_kms_key_arn {
        validation::matches("eks.volumeKmsKeyArn", &KMS_KEY_ARN, arn)?;
    }

    Ok(models::EksConfig {
        security_groups: Some(eks.security_groups.clone()),
        instance_profile_arn: eks.instance_profile_arn.clone(),
        dns_cluster_ip: eks.dns_cluster_ip.clone(),
        key_pair_id: eks.key_pair_id.clone(),
        volume_type: eks.volume_type.clone(),
        volume_iops: eks.volume_iops,
        volume_throughput: eks.volume_throughput,
        imds_v1: eks.imds_v1,
        imds_hop_limit: eks.imds_hop_limit,
        volume_kms_key_arn: eks.volume_kms_key_arn.clone(),
    })
}

/// Declared-side view of a wire EKS block.
///
/// Missing `securityGroups` decode to an empty list, which is the absent
/// marker: `encode` rejects an empty list, so it can never be declared and
/// always shows up as drift against a declaration.
pub fn decode(wire: &models::EksConfig) -> EksConfig {
    EksConfig {
        security_groups: wire.security_groups.clone().unwrap_or_default(),
        instance_profile_arn: wire.instance_profile_arn.clone(),
        dns_cluster_ip: wire.dns_cluster_ip.clone(),
        key_pair_id: wire.key_pair_id.clone(),
        volume_type: wire.volume_type.clone(),
        volume_iops: wire.volume_iops,
        volume_throughput: wire.volume_throughput,
        imds_v1: wire.imds_v1,
        imds_hop_limit: wire.imds_hop_limit,
        volume_kms_key_arn: wire.volume_kms_key_arn.clone(),
    }
}
