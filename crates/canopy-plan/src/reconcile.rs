//! Allocation reconciliation
//!
//! Gate between derivation and assembly: every unit's allocation plus the
//! explicit external distribution must sum to the declared token supply
//! exactly. A mismatch would deploy a token whose minted distribution and
//! declared supply disagree, and that cannot be patched after the fact, so
//! reconciliation refuses to let assembly start.

use alloy_primitives::U256;

use canopy_core::error::{CanopyError, Result};
use canopy_core::{Allocation, DerivedUnit};

/// Collect the full distribution and require it to equal `supply` exactly.
///
/// Returns the flattened allocation list (units pre-order, then external
/// entries) that the token initializer mints from.
pub fn reconcile(
    root: &DerivedUnit,
    external: &[Allocation],
    supply: U256,
) -> Result<Vec<Allocation>> {
    let mut allocations = Vec::with_capacity(root.count() + external.len());
    root.walk(&mut |unit| {
        allocations.push(Allocation {
            address: unit.derived.predicted_address,
            amount: unit.allocation,
        });
    });
    allocations.extend_from_slice(external);

    let mut computed = U256::ZERO;
    for allocation in &allocations {
        computed = computed.checked_add(allocation.amount).ok_or_else(|| {
            CanopyError::configuration("allocation amounts overflow a uint256 sum")
        })?;
    }

    if computed != supply {
        return Err(CanopyError::AllocationMismatch {
            computed,
            declared: supply,
        });
    }

    Ok(allocations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Address, Bytes};
    use canopy_core::DerivedData;
    use proptest::prelude::*;

    fn derived_unit(tag: u8, amount: u64, children: Vec<DerivedUnit>) -> DerivedUnit {
        let mut addr = [0u8; 20];
        addr[19] = tag;
        DerivedUnit {
            name: format!("unit-{tag}"),
            owners: vec![address!("1111111111111111111111111111111111111111")],
            threshold: 1,
            allocation: U256::from(amount),
            derived: DerivedData {
                salt_nonce: U256::from(tag),
                initialization_data: Bytes::new(),
                predicted_address: Address::from(addr),
            },
            children,
        }
    }

    #[test]
    fn test_exact_sum_passes_and_flattens_preorder() {
        let tree = derived_unit(1, 60, vec![derived_unit(2, 30, Vec::new())]);
        let external = [Allocation {
            address: address!("00000000000000000000000000000000000000aa"),
            amount: U256::from(10u64),
        }];
        let allocations = reconcile(&tree, &external, U256::from(100u64)).unwrap();

        assert_eq!(allocations.len(), 3);
        assert_eq!(allocations[0].amount, U256::from(60u64));
        assert_eq!(allocations[1].amount, U256::from(30u64));
        assert_eq!(allocations[2].amount, U256::from(10u64));
        let total: U256 = allocations
            .iter()
            .fold(U256::ZERO, |acc, a| acc + a.amount);
        assert_eq!(total, U256::from(100u64));
    }

    #[test]
    fn test_off_by_one_fails_with_both_sums() {
        let tree = derived_unit(1, 60, vec![derived_unit(2, 39, Vec::new())]);
        let err = reconcile(&tree, &[], U256::from(100u64)).unwrap_err();
        match err {
            CanopyError::AllocationMismatch { computed, declared } => {
                assert_eq!(computed, U256::from(99u64));
                assert_eq!(declared, U256::from(100u64));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overflowing_sum_is_rejected() {
        let tree = derived_unit(1, 1, Vec::new());
        let external = [
            Allocation {
                address: address!("00000000000000000000000000000000000000aa"),
                amount: U256::MAX,
            },
            Allocation {
                address: address!("00000000000000000000000000000000000000ab"),
                amount: U256::MAX,
            },
        ];
        assert!(reconcile(&tree, &external, U256::MAX).is_err());
    }

    proptest! {
        #[test]
        fn prop_sum_equality_decides_outcome(
            unit_amount in 0u64..1_000_000,
            child_amount in 0u64..1_000_000,
            external_amount in 0u64..1_000_000,
            skew in 0u64..3,
        ) {
            let tree = derived_unit(1, unit_amount, vec![derived_unit(2, child_amount, Vec::new())]);
            let external = [Allocation {
                address: address!("00000000000000000000000000000000000000aa"),
                amount: U256::from(external_amount),
            }];
            let exact = U256::from(unit_amount) + U256::from(child_amount) + U256::from(external_amount);
            let declared = exact + U256::from(skew);

            let result = reconcile(&tree, &external, declared);
            if skew == 0 {
                prop_assert!(result.is_ok());
            } else {
                let is_mismatch = matches!(result, Err(CanopyError::AllocationMismatch { .. }));
                prop_assert!(is_mismatch);
            }
        }
    }
}
