//! Derivation pass
//!
//! First of the two tree walks. Every unit gets a fresh salt nonce, its
//! account setup initializer, and its predicted deployment address. The pass
//! is a pure mapping from [`OrgUnit`] to [`DerivedUnit`]; no node depends on
//! any other node's derived data, but the assembly pass reads children's
//! predicted addresses, so the whole derived tree is materialized before
//! assembly starts.

use canopy_codec::account::setup_initializer;
use canopy_core::{ContractAddresses, DerivedData, DerivedUnit, OrgUnit};

use crate::predict::predict_account_address;
use crate::salt::SaltSource;

/// Read-only inputs of the derivation pass
#[derive(Debug, Clone, Copy)]
pub struct DeriveContext<'a> {
    /// Fixed singleton deployments on the target chain
    pub contracts: &'a ContractAddresses,
    /// Account factory creation code, read from the live contract
    pub proxy_creation_code: &'a [u8],
}

/// Map a raw unit tree onto a derived tree, children first.
pub fn derive_tree(
    unit: &OrgUnit,
    ctx: &DeriveContext<'_>,
    salts: &mut dyn SaltSource,
) -> DerivedUnit {
    let children = unit
        .children
        .iter()
        .map(|child| derive_tree(child, ctx, salts))
        .collect();

    let salt_nonce = salts.next_salt_nonce();
    let initialization_data = setup_initializer(
        &unit.owners,
        ctx.contracts.multisend_call_only,
        ctx.contracts.fallback_handler,
    );
    let predicted_address = predict_account_address(
        ctx.proxy_creation_code,
        ctx.contracts.account_proxy_factory,
        ctx.contracts.account_singleton,
        &initialization_data,
        salt_nonce,
    );

    tracing::debug!(unit = %unit.name, address = %predicted_address, "derived unit");

    DerivedUnit {
        name: unit.name.clone(),
        owners: unit.owners.clone(),
        threshold: unit.threshold,
        allocation: unit.allocation,
        derived: DerivedData {
            salt_nonce,
            initialization_data,
            predicted_address,
        },
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salt::SequentialSaltSource;
    use alloy_primitives::{address, U256};
    use canopy_core::Chain;

    fn two_level_tree() -> OrgUnit {
        OrgUnit {
            name: "root".into(),
            owners: vec![address!("1111111111111111111111111111111111111111")],
            threshold: 1,
            allocation: U256::from(60u64),
            children: vec![OrgUnit {
                name: "ops".into(),
                owners: vec![address!("2222222222222222222222222222222222222222")],
                threshold: 1,
                allocation: U256::from(40u64),
                children: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_every_unit_gets_unique_salt_and_address() {
        let contracts = ContractAddresses::for_chain(Chain::Sepolia);
        let ctx = DeriveContext {
            contracts: &contracts,
            proxy_creation_code: &[0x60, 0x80],
        };
        let derived = derive_tree(&two_level_tree(), &ctx, &mut SequentialSaltSource::new(1));

        let child = &derived.children[0];
        assert_ne!(derived.derived.salt_nonce, child.derived.salt_nonce);
        assert_ne!(
            derived.derived.predicted_address,
            child.derived.predicted_address
        );
        // Setup data embeds owners, so it differs across these units too.
        assert_ne!(
            derived.derived.initialization_data,
            child.derived.initialization_data
        );
    }

    #[test]
    fn test_derivation_is_deterministic_given_salts() {
        let contracts = ContractAddresses::for_chain(Chain::Sepolia);
        let ctx = DeriveContext {
            contracts: &contracts,
            proxy_creation_code: &[0x60, 0x80],
        };
        let first = derive_tree(&two_level_tree(), &ctx, &mut SequentialSaltSource::new(7));
        let second = derive_tree(&two_level_tree(), &ctx, &mut SequentialSaltSource::new(7));
        assert_eq!(first, second);
    }

    #[test]
    fn test_tree_shape_is_preserved() {
        let contracts = ContractAddresses::for_chain(Chain::Base);
        let ctx = DeriveContext {
            contracts: &contracts,
            proxy_creation_code: &[0x00],
        };
        let derived = derive_tree(&two_level_tree(), &ctx, &mut SequentialSaltSource::new(1));
        assert_eq!(derived.count(), 2);
        assert_eq!(derived.name, "root");
        assert_eq!(derived.children[0].name, "ops");
        assert_eq!(derived.children[0].allocation, U256::from(40u64));
    }
}
