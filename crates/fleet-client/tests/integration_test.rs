//! Integration tests for the fleet client
//!
//! These tests require a reachable fleet API and an existing cluster.
//! Set FLEET_API_URL, FLEET_API_TOKEN and FLEET_CLUSTER_ID to run.

use fleet_client::{FleetClient, NewNodeConfiguration, NodeConfigurationApi};

fn client_from_env() -> (FleetClient, String) {
    let url = std::env::var("FLEET_API_URL").unwrap_or_else(|_| "https://api.cast.ai".to_string());
    let token = std::env::var("FLEET_API_TOKEN").expect("FLEET_API_TOKEN environment variable must be set");
    let cluster = std::env::var("FLEET_CLUSTER_ID").expect("FLEET_CLUSTER_ID environment variable must be set");

    (FleetClient::new(url, token).expect("Failed to create client"), cluster)
}

#[tokio::test]
#[ignore] // Requires a live fleet API
async fn test_list_configurations() {
    let (client, cluster) = client_from_env();

    let configurations = client
        .list_configurations(&cluster)
        .await
        .expect("Failed to list node configurations");

    println!("Found {} node configurations", configurations.len());
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_configuration() {
    let (client, cluster) = client_from_env();

    let request = NewNodeConfiguration {
        name: format!("it-{}", uuid::Uuid::new_v4().simple()),
        subnets: Some(vec![std::env::var("FLEET_SUBNET_ID").unwrap_or_else(|_| "subnet-1".to_string())]),
        ..Default::default()
    };

    let created = client.create_configuration(&cluster, &request).await;

    if let Ok(created) = created {
        println!("Created node configuration: {:?}", created.id);

        // Clean up
        if let Some(id) = created.id {
            let _ = client.delete_configuration(&cluster, &id).await;
        }
    }
}
