//! Deployment manifest
//!
//! The manifest is one TOML document describing everything a run deploys:
//! the token, the explicit external distribution list, the freeze governance
//! parameters, and the organizational unit tree. Amounts in the manifest are
//! whole tokens; they are scaled into base units here, once, so the rest of
//! the pipeline only ever sees base units.

use alloy_primitives::Address;
use serde::Deserialize;

use crate::error::{CanopyError, Result};
use crate::freeze::FreezeConfig;
use crate::token::{to_base_units, Allocation, TokenDescriptor};
use crate::unit::OrgUnit;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    token: RawToken,
    #[serde(default)]
    airdrops: Vec<RawAllocation>,
    freeze: RawFreeze,
    root: RawUnit,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawToken {
    name: String,
    symbol: String,
    supply: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAllocation {
    address: Address,
    amount: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFreeze {
    freeze_proposal_period: u32,
    freeze_period: u32,
    timelock_period: u32,
    execution_period: u32,
    /// Accepted for config-surface compatibility; the parent unit's approval
    /// threshold governs each freeze voting deployment.
    #[serde(default)]
    votes_threshold: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawUnit {
    name: String,
    owners: Vec<Address>,
    threshold: u64,
    allocation: u64,
    #[serde(default)]
    children: Vec<RawUnit>,
}

/// Validated deployment manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Token deployed alongside the hierarchy
    pub token: TokenDescriptor,
    /// Explicit external distribution entries, may be empty
    pub airdrops: Vec<Allocation>,
    /// Freeze governance parameters
    pub freeze: FreezeConfig,
    /// Root of the organizational unit tree
    pub root: OrgUnit,
}

impl Manifest {
    /// Parse and validate a TOML manifest document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawManifest = toml::from_str(text)
            .map_err(|err| CanopyError::serialization(format!("manifest: {err}")))?;

        if raw.freeze.votes_threshold.is_some() {
            tracing::warn!(
                "manifest sets freeze.votes_threshold; each freeze voting module \
                 uses the parent unit's approval threshold instead"
            );
        }

        let root = validate_unit(&raw.root)?;

        Ok(Self {
            token: TokenDescriptor {
                name: raw.token.name,
                symbol: raw.token.symbol,
                supply: to_base_units(raw.token.supply),
            },
            airdrops: raw
                .airdrops
                .iter()
                .map(|a| Allocation {
                    address: a.address,
                    amount: to_base_units(a.amount),
                })
                .collect(),
            freeze: FreezeConfig {
                freeze_proposal_period: raw.freeze.freeze_proposal_period,
                freeze_period: raw.freeze.freeze_period,
                timelock_period: raw.freeze.timelock_period,
                execution_period: raw.freeze.execution_period,
            },
            root,
        })
    }
}

fn validate_unit(raw: &RawUnit) -> Result<OrgUnit> {
    if raw.name.trim().is_empty() {
        return Err(CanopyError::configuration("unit with empty name"));
    }
    if raw.owners.is_empty() {
        return Err(CanopyError::configuration(format!(
            "unit \"{}\" has no owners",
            raw.name
        )));
    }
    if raw.threshold == 0 {
        return Err(CanopyError::configuration(format!(
            "unit \"{}\" has a zero approval threshold",
            raw.name
        )));
    }
    if raw.threshold > raw.owners.len() as u64 {
        tracing::warn!(
            unit = %raw.name,
            threshold = raw.threshold,
            owners = raw.owners.len(),
            "approval threshold exceeds owner count"
        );
    }

    let children = raw
        .children
        .iter()
        .map(validate_unit)
        .collect::<Result<Vec<_>>>()?;

    Ok(OrgUnit {
        name: raw.name.clone(),
        owners: raw.owners.clone(),
        threshold: raw.threshold,
        allocation: to_base_units(raw.allocation),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const MANIFEST: &str = r#"
        [token]
        name = "Example"
        symbol = "EXM"
        supply = 100

        [[airdrops]]
        address = "0x00000000000000000000000000000000000000aa"
        amount = 10

        [freeze]
        freeze_proposal_period = 604800
        freeze_period = 604800
        timelock_period = 86400
        execution_period = 86400

        [root]
        name = "Root"
        owners = ["0x1111111111111111111111111111111111111111"]
        threshold = 1
        allocation = 50

        [[root.children]]
        name = "Ops"
        owners = [
            "0x2222222222222222222222222222222222222222",
            "0x3333333333333333333333333333333333333333",
        ]
        threshold = 2
        allocation = 40
    "#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::from_toml_str(MANIFEST).unwrap();
        assert_eq!(manifest.token.symbol, "EXM");
        assert_eq!(manifest.token.supply, to_base_units(100));
        assert_eq!(manifest.airdrops.len(), 1);
        assert_eq!(manifest.airdrops[0].amount, to_base_units(10));
        assert_eq!(manifest.root.children.len(), 1);
        let ops = &manifest.root.children[0];
        assert_eq!(ops.threshold, 2);
        assert_eq!(
            ops.owners[1],
            address!("3333333333333333333333333333333333333333")
        );
        assert_eq!(manifest.freeze.timelock_period, 86400);
    }

    #[test]
    fn test_rejects_empty_owners() {
        let text = MANIFEST.replace(
            "owners = [\"0x1111111111111111111111111111111111111111\"]",
            "owners = []",
        );
        let err = Manifest::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, CanopyError::Configuration { .. }));
        assert!(err.to_string().contains("Root"));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let text = MANIFEST.replace("threshold = 2", "threshold = 0");
        let err = Manifest::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, CanopyError::Configuration { .. }));
        assert!(err.to_string().contains("Ops"));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let text = format!("{MANIFEST}\nextra = 1\n");
        assert!(Manifest::from_toml_str(&text).is_err());
    }
}
