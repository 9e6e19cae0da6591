//! KOPS variant

use crate::error::ReconcileError;
use crate::validation::{self, KEY_PAIR_ID};
use crds::KopsConfig;
use fleet_client::models;

pub fn encode(kops: &KopsConfig) -> Result<models::KopsConfig, ReconcileError> {
    if let Some(key_pair_id) = &kops.key_pair_id {
        validation::matches("kops.keyPairId", &KEY_PAIR_ID, key_pair_id)?;
    }
    Ok(models::KopsConfig {
        key_pair_id: kops.key_pair_id.clone(),
    })
}

pub fn decode(wire: &models::KopsConfig) -> KopsConfig {
    KopsConfig {
        key_pair_id: wire.key_pair_id.clone(),
    }
}
