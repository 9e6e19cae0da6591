//! Variant codec
//!
//! Maps the active provider block between its declared shape (`crds`) and
//! its wire shape (`fleet_client`). Encoding validates and omits absent
//! fields; decoding copies wire-present fields verbatim and never fills in
//! declared-side defaults.

pub mod aks;
pub mod eks;
pub mod gke;
pub mod kops;

use crate::error::ReconcileError;
use crds::ProviderConfig;
use fleet_client::models;

/// Wire slots for the provider variants; at most one is `Some`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireVariants {
    pub eks: Option<models::EksConfig>,
    pub aks: Option<models::AksConfig>,
    pub kops: Option<models::KopsConfig>,
    pub gke: Option<models::GkeConfig>,
}

/// Encode the active variant into its wire slot.
pub fn encode(provider: Option<&ProviderConfig>) -> Result<WireVariants, ReconcileError> {
    let mut wire = WireVariants::default();
    match provider {
        Some(ProviderConfig::Eks(eks)) => wire.eks = Some(eks::encode(eks)?),
        Some(ProviderConfig::Aks(aks)) => wire.aks = Some(aks::encode(aks)?),
        Some(ProviderConfig::Kops(kops)) => wire.kops = Some(kops::encode(kops)?),
        Some(ProviderConfig::Gke(gke)) => wire.gke = Some(gke::encode(gke)?),
        None => {}
    }
    Ok(wire)
}

/// Decode whichever wire slot is populated.
///
/// More than one populated slot breaks the API contract and yields
/// `InvariantViolation`.
pub fn decode(wire: &WireVariants) -> Result<Option<ProviderConfig>, ReconcileError> {
    let mut decoded = Vec::with_capacity(1);
    if let Some(eks) = &wire.eks {
        decoded.push(ProviderConfig::Eks(eks::decode(eks)));
    }
    if let Some(aks) = &wire.aks {
        decoded.push(ProviderConfig::Aks(aks::decode(aks)));
    }
    if let Some(kops) = &wire.kops {
        decoded.push(ProviderConfig::Kops(kops::decode(kops)));
    }
    if let Some(gke) = &wire.gke {
        decoded.push(ProviderConfig::Gke(gke::decode(gke)));
    }

    if decoded.len() > 1 {
        let kinds: Vec<&str> = decoded.iter().map(ProviderConfig::kind).collect();
        return Err(ReconcileError::InvariantViolation(format!(
            "response carries more than one provider variant: {}",
            kinds.join(", ")
        )));
    }
    Ok(decoded.pop())
}
