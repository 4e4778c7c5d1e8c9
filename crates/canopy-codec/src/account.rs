//! Primary account calls
//!
//! Builders for every call made against a primary account contract: the
//! setup initializer baked into its deployment, the outer exec-transaction
//! wrapper, and the module/guard/owner management calls executed from inside
//! that wrapper.

use alloy_primitives::{Address, Bytes, U256};

use canopy_core::Call;

use crate::abi::{call_data, AbiValue};

const SETUP_SIG: &str = "setup(address[],uint256,address,bytes,address,address,uint256,address)";
const EXEC_TRANSACTION_SIG: &str =
    "execTransaction(address,uint256,bytes,uint8,uint256,uint256,uint256,address,address,bytes)";
const ENABLE_MODULE_SIG: &str = "enableModule(address)";
const SET_GUARD_SIG: &str = "setGuard(address)";
const REMOVE_OWNER_SIG: &str = "removeOwner(address,address,uint256)";

/// Account setup calldata for a unit.
///
/// The bootstrap co-owner is appended after the declared owners and the
/// on-chain threshold is fixed to one, so a single pre-validated signature
/// from the bootstrap co-owner can drive the unit's entire configuration
/// batch. The final call of that batch removes the bootstrap co-owner and
/// restores the declared threshold.
pub fn setup_initializer(
    owners: &[Address],
    bootstrap: Address,
    fallback_handler: Address,
) -> Bytes {
    let mut all_owners = owners.to_vec();
    all_owners.push(bootstrap);

    call_data(
        SETUP_SIG,
        &[
            AbiValue::AddressArray(all_owners),
            AbiValue::Uint(U256::from(1u64)),
            AbiValue::Address(Address::ZERO),
            AbiValue::Bytes(Vec::new()),
            AbiValue::Address(fallback_handler),
            AbiValue::Address(Address::ZERO),
            AbiValue::Uint(U256::ZERO),
            AbiValue::Address(Address::ZERO),
        ],
    )
}

/// Pre-validated signature blob for an exec-transaction driven by `approver`.
///
/// `r` carries the approver address, `s` is unused, `v = 1` marks the
/// signature as pre-validated: the account accepts it when `approver` is an
/// owner and is the `msg.sender` of the call.
fn prevalidated_signature(approver: Address) -> Vec<u8> {
    let mut sig = Vec::with_capacity(65);
    sig.extend_from_slice(&approver.into_word().0);
    sig.extend_from_slice(&[0u8; 32]);
    sig.push(1);
    sig
}

/// Exec-transaction that delegate-calls the unit's configuration batch.
///
/// `delegate_target` is the call-only multisend executor; it doubles as the
/// bootstrap co-owner, which is what makes the pre-validated signature land.
pub fn exec_batch_call(account: Address, delegate_target: Address, data: Bytes) -> Call {
    Call::call(
        account,
        call_data(
            EXEC_TRANSACTION_SIG,
            &[
                AbiValue::Address(delegate_target),
                AbiValue::Uint(U256::ZERO),
                AbiValue::Bytes(data.to_vec()),
                AbiValue::Uint(U256::from(1u64)),
                AbiValue::Uint(U256::ZERO),
                AbiValue::Uint(U256::ZERO),
                AbiValue::Uint(U256::ZERO),
                AbiValue::Address(Address::ZERO),
                AbiValue::Address(Address::ZERO),
                AbiValue::Bytes(prevalidated_signature(delegate_target)),
            ],
        ),
    )
}

/// Enable a governance module on the account.
pub fn enable_module_call(account: Address, module: Address) -> Call {
    Call::call(
        account,
        call_data(ENABLE_MODULE_SIG, &[AbiValue::Address(module)]),
    )
}

/// Set the transaction guard on the account.
pub fn set_guard_call(account: Address, guard: Address) -> Call {
    Call::call(account, call_data(SET_GUARD_SIG, &[AbiValue::Address(guard)]))
}

/// Remove `owner` from the account's owner list and set `threshold`.
///
/// The account stores owners as a linked list, so removal names the owner
/// that precedes the one being removed.
pub fn remove_owner_call(
    account: Address,
    prev_owner: Address,
    owner: Address,
    threshold: u64,
) -> Call {
    Call::call(
        account,
        call_data(
            REMOVE_OWNER_SIG,
            &[
                AbiValue::Address(prev_owner),
                AbiValue::Address(owner),
                AbiValue::Uint(U256::from(threshold)),
            ],
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const UNIT: Address = address!("00000000000000000000000000000000000000d1");
    const BOOTSTRAP: Address = address!("a1dabef33b3b82c7814b6d82a79e50f4ac44102b");

    #[test]
    fn test_setup_appends_bootstrap_and_pins_threshold() {
        let owner = address!("1111111111111111111111111111111111111111");
        let handler = address!("017062a1de2fe6b99be3d9d37841fed19f573804");
        let data = setup_initializer(&[owner], BOOTSTRAP, handler);

        assert_eq!(&data[..4], &[0xb6, 0x3e, 0x80, 0x0d]);
        // Head: owners offset, threshold, to, data offset, handler, token,
        // payment, receiver. Threshold is the second head word.
        let threshold_word = &data[4 + 32..4 + 64];
        assert_eq!(threshold_word[31], 1);
        // Owners tail: length 2, owner, bootstrap.
        let owners_tail = &data[4 + 8 * 32..];
        assert_eq!(owners_tail[31], 2);
        assert_eq!(&owners_tail[32 + 12..64], owner.as_slice());
        assert_eq!(&owners_tail[64 + 12..96], BOOTSTRAP.as_slice());
    }

    #[test]
    fn test_exec_batch_is_delegatecall_with_prevalidated_signature() {
        let call = exec_batch_call(UNIT, BOOTSTRAP, Bytes::from(vec![0xaa, 0xbb]));
        assert_eq!(call.to, UNIT);
        assert_eq!(&call.data[..4], &[0x6a, 0x76, 0x12, 0x02]);

        // Fourth head word is the inner operation: delegate-call.
        let operation_word = &call.data[4 + 3 * 32..4 + 4 * 32];
        assert_eq!(operation_word[31], 1);

        // The signatures tail is the last dynamic parameter: a 65 length
        // word, then r(bootstrap) s(0) v(1), zero-padded to a word boundary.
        let tail = &call.data[call.data.len() - 128..];
        assert_eq!(tail[31], 65);
        let sig = &tail[32..97];
        assert_eq!(&sig[12..32], BOOTSTRAP.as_slice());
        assert!(sig[32..64].iter().all(|b| *b == 0));
        assert_eq!(sig[64], 1);
        assert!(tail[97..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_remove_owner_restores_threshold() {
        let prev = address!("2222222222222222222222222222222222222222");
        let call = remove_owner_call(UNIT, prev, BOOTSTRAP, 3);
        assert_eq!(&call.data[..4], &[0xf8, 0xdc, 0x5d, 0xd9]);
        assert_eq!(&call.data[4 + 12..4 + 32], prev.as_slice());
        assert_eq!(&call.data[4 + 32 + 12..4 + 64], BOOTSTRAP.as_slice());
        assert_eq!(call.data[4 + 95], 3);
    }

    #[test]
    fn test_enable_module_and_set_guard_target_the_account() {
        let module = address!("3333333333333333333333333333333333333333");
        assert_eq!(enable_module_call(UNIT, module).to, UNIT);
        assert_eq!(set_guard_call(UNIT, module).to, UNIT);
        assert_eq!(
            &enable_module_call(UNIT, module).data[..4],
            &[0x61, 0x0b, 0x59, 0x25]
        );
        assert_eq!(
            &set_guard_call(UNIT, module).data[..4],
            &[0xe1, 0x9a, 0x9d, 0xd9]
        );
    }
}
