//! AKS variant

use crate::error::ReconcileError;
use crate::validation;
use crds::{AksConfig, OsDiskType};
use fleet_client::models::{self, AksOsDiskType};
use tracing::warn;

pub fn encode(aks: &AksConfig) -> Result<models::AksConfig, ReconcileError> {
    if let Some(max_pods) = aks.max_pods_per_node {
        validation::between("aks.maxPodsPerNode", max_pods, 10, 250)?;
    }
    Ok(models::AksConfig {
        max_pods_per_node: aks.max_pods_per_node,
        os_disk_type: aks.os_disk_type.map(to_wire_disk_type),
    })
}

pub fn decode(wire: &models::AksConfig) -> AksConfig {
    AksConfig {
        max_pods_per_node: wire.max_pods_per_node,
        os_disk_type: wire.os_disk_type.as_ref().and_then(from_wire_disk_type),
    }
}

fn to_wire_disk_type(disk_type: OsDiskType) -> AksOsDiskType {
    match disk_type {
        OsDiskType::Standard => AksOsDiskType::Standard,
        OsDiskType::StandardSsd => AksOsDiskType::StandardSsd,
        OsDiskType::PremiumSsd => AksOsDiskType::PremiumSsd,
    }
}

/// Unknown wire values read back as unset.
fn from_wire_disk_type(disk_type: &AksOsDiskType) -> Option<OsDiskType> {
    match disk_type {
        AksOsDiskType::Standard => Some(OsDiskType::Standard),
        AksOsDiskType::StandardSsd => Some(OsDiskType::StandardSsd),
        AksOsDiskType::PremiumSsd => Some(OsDiskType::PremiumSsd),
        AksOsDiskType::Unrecognized(raw) => {
            warn!("Ignoring unrecognized AKS osDiskType {:?} from fleet API", raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_maps_disk_type() {
        let wire = encode(&AksConfig {
            max_pods_per_node: Some(40),
            os_disk_type: Some(OsDiskType::StandardSsd),
        })
        .unwrap();
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            serde_json::json!({"maxPodsPerNode": 40, "osDiskType": "OS_DISK_TYPE_STANDARD_SSD"})
        );
    }

    #[test]
    fn test_encode_checks_max_pods_range() {
        for max_pods in [9, 251] {
            let err = encode(&AksConfig {
                max_pods_per_node: Some(max_pods),
                os_disk_type: None,
            })
            .unwrap_err();
            assert!(matches!(err, ReconcileError::Validation { .. }));
        }
        assert!(encode(&AksConfig { max_pods_per_node: Some(250), os_disk_type: None }).is_ok());
    }

    // Documented quirk: an osDiskType the client does not know is dropped
    // to unset instead of failing the read.
    #[test]
    fn test_decode_unrecognized_disk_type_reads_as_unset() {
        let wire: models::AksConfig = serde_json::from_value(serde_json::json!({
            "maxPodsPerNode": 30,
            "osDiskType": "OS_DISK_TYPE_ULTRA"
        }))
        .unwrap();
        let aks = decode(&wire);
        assert_eq!(aks.max_pods_per_node, Some(30));
        assert_eq!(aks.os_disk_type, None);
    }

    #[test]
    fn test_decode_known_disk_type() {
        let wire = models::AksConfig {
            max_pods_per_node: None,
            os_disk_type: Some(AksOsDiskType::PremiumSsd),
        };
        assert_eq!(decode(&wire).os_disk_type, Some(OsDiskType::PremiumSsd));
    }
}
