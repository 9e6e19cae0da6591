//! Unit tests for the configuration translator

#[cfg(test)]
mod tests {
    use crate::error::ReconcileError;
    use crate::test_utils::*;
    use crate::translator::*;
    use crds::{AksConfig, GkeConfig, KopsConfig, NodeConfigurationSpec, OsDiskType, ProviderConfig};
    use fleet_client::models::{self, NodeConfiguration};
    use serde_json::json;

    #[test]
    fn test_create_request_matches_example_payload() {
        let spec = eks_spec("c1", "pool-a");
        let request = to_create_request(&spec).unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "pool-a",
                "minDiskSize": 50,
                "subnets": ["subnet-1"],
                "eks": {
                    "securityGroups": ["sg-1"],
                    "instanceProfileArn": "arn:aws:iam::1:instance-profile/x"
                }
            })
        );
    }

    #[test]
    fn test_create_and_update_share_field_coverage() {
        let mut spec = eks_spec("c1", "pool-a");
        spec.disk_cpu_ratio = Some(2);
        spec.docker_config = Some(r#"{"b": 1, "a": true}"#.to_string());
        spec.tags.insert("team".to_string(), "infra".to_string());

        let mut create = serde_json::to_value(to_create_request(&spec).unwrap()).unwrap();
        let update = serde_json::to_value(to_update_request(&spec).unwrap()).unwrap();
        assert!(update.get("name").is_none());

        create.as_object_mut().unwrap().remove("name");
        assert_eq!(create, update);
    }

    #[test]
    fn test_empty_tags_are_omitted() {
        let request = to_update_request(&eks_spec("c1", "pool-a")).unwrap();
        assert!(request.tags.is_none());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_tags_sent_as_flat_object() {
        let mut spec = eks_spec("c1", "pool-a");
        spec.tags.insert("env".to_string(), "prod".to_string());
        let json = serde_json::to_value(to_update_request(&spec).unwrap()).unwrap();
        assert_eq!(json["tags"], json!({"env": "prod"}));
    }

    #[test]
    fn test_two_provider_blocks_rejected_before_wire() {
        let mut spec = eks_spec("c1", "pool-a");
        spec.gke = Some(GkeConfig::default());

        let err = to_create_request(&spec).unwrap_err();
        match err {
            ReconcileError::Validation { field, message } => {
                assert_eq!(field, "provider");
                assert!(message.contains("eks, gke"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_active_provider_folds_single_block() {
        let mut spec = base_spec("c1", "pool-a");
        assert_eq!(active_provider(&spec).unwrap(), None);

        spec.kops = Some(KopsConfig::default());
        assert_eq!(
            active_provider(&spec).unwrap(),
            Some(ProviderConfig::Kops(KopsConfig::default()))
        );
    }

    #[test]
    fn test_malformed_json_names_field() {
        let mut spec = eks_spec("c1", "pool-a");
        spec.kubelet_config = Some("{not json".to_string());
        match to_update_request(&spec).unwrap_err() {
            ReconcileError::ConfigParse { field, .. } => assert_eq!(field, "kubeletConfig"),
            other => panic!("unexpected error: {other:?}"),
        }

        spec.kubelet_config = None;
        spec.docker_config = Some("[1, 2]".to_string());
        match to_update_request(&spec).unwrap_err() {
            ReconcileError::ConfigParse { field, message } => {
                assert_eq!(field, "dockerConfig");
                assert!(message.contains("array"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scalar_validation() {
        fn break_field(spec: &mut NodeConfigurationSpec, case: usize) {
            match case {
                0 => spec.cluster_id = " ".to_string(),
                1 => spec.name = "\t".to_string(),
                2 => spec.disk_cpu_ratio = Some(-1),
                3 => spec.min_disk_size = Some(1001),
                4 => spec.min_disk_size = Some(29),
                5 => spec.subnets.clear(),
                6 => spec.ssh_public_key = Some("ssh-rsa AAAA user@host".to_string()),
                7 => spec.init_script = Some("#!/bin/bash".to_string()),
                8 => spec.image = Some("  ".to_string()),
                _ => spec.container_runtime = Some("crio".to_string()),
            }
        }
        let expected_fields = [
            "clusterId",
            "name",
            "diskCpuRatio",
            "minDiskSize",
            "minDiskSize",
            "subnets",
            "sshPublicKey",
            "initScript",
            "image",
            "containerRuntime",
        ];

        for (case, expected) in expected_fields.into_iter().enumerate() {
            let mut spec = eks_spec("c1", "pool-a");
            break_field(&mut spec, case);
            match to_create_request(&spec).unwrap_err() {
                ReconcileError::Validation { field, .. } => assert_eq!(field, expected),
                other => panic!("unexpected error for {expected}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_container_runtime_case_insensitive() {
        let mut spec = eks_spec("c1", "pool-a");
        spec.container_runtime = Some("CONTAINERD".to_string());
        assert!(to_create_request(&spec).is_ok());
    }

    #[test]
    fn test_round_trip_reproduces_declared_fields() {
        let mut spec = base_spec("c1", "pool-b");
        spec.disk_cpu_ratio = Some(4);
        spec.subnets = vec!["subnet-2".to_string(), "subnet-1".to_string()];
        spec.ssh_public_key = Some("c3NoLXJzYSBBQUFB".to_string());
        spec.image = Some("ami-123".to_string());
        spec.init_script = Some("ZWNobyBoaQ==".to_string());
        spec.container_runtime = Some("containerd".to_string());
        spec.docker_config = Some(r#"{"insecure-registries":["r.local"],"debug":true}"#.to_string());
        spec.tags.insert("team".to_string(), "infra".to_string());
        spec.aks = Some(AksConfig {
            max_pods_per_node: Some(50),
            os_disk_type: Some(OsDiskType::Standard),
        });

        let request = to_create_request(&spec).unwrap();
        let response = NodeConfiguration {
            id: Some("11111111-2222-3333-4444-555555555555".to_string()),
            name: Some(request.name.clone()),
            disk_cpu_ratio: request.disk_cpu_ratio,
            min_disk_size: request.min_disk_size,
            subnets: request.subnets.clone(),
            ssh_public_key: request.ssh_public_key.clone(),
            image: request.image.clone(),
            init_script: request.init_script.clone(),
            container_runtime: request.container_runtime.clone(),
            docker_config: request.docker_config.clone(),
            kubelet_config: request.kubelet_config.clone(),
            tags: request.tags.clone(),
            aks: request.aks.clone(),
            ..Default::default()
        };

        let decoded = from_wire("c1", &response).unwrap();
        // JSON text comes back canonical: sorted keys, compact
        assert_eq!(
            decoded.docker_config.as_deref(),
            Some(r#"{"debug":true,"insecure-registries":["r.local"]}"#)
        );

        let mut expected = spec.clone();
        expected.docker_config = decoded.docker_config.clone();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_from_wire_keeps_server_defaults_absent_when_missing() {
        let response = NodeConfiguration {
            name: Some("pool-a".to_string()),
            subnets: Some(vec!["subnet-1".to_string()]),
            gke: Some(models::GkeConfig::default()),
            ..Default::default()
        };
        let decoded = from_wire("c1", &response).unwrap();
        assert_eq!(decoded.disk_cpu_ratio, None);
        assert_eq!(decoded.min_disk_size, None);
        assert_eq!(decoded.gke, Some(GkeConfig::default()));
        assert!(decoded.tags.is_empty());
    }

    #[test]
    fn test_from_wire_rejects_two_variants() {
        let response = NodeConfiguration {
            name: Some("pool-a".to_string()),
            eks: Some(models::EksConfig::default()),
            kops: Some(models::KopsConfig::default()),
            ..Default::default()
        };
        assert!(matches!(
            from_wire("c1", &response),
            Err(ReconcileError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_blank_json_text_treated_as_absent() {
        assert_eq!(parse_json_object("dockerConfig", Some("  ")).unwrap(), None);
        assert_eq!(parse_json_object("dockerConfig", None).unwrap(), None);
    }
}
