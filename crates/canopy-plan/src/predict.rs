//! Address oracle
//!
//! Pure CREATE2 predictions for the two deployment shapes a run uses:
//! minimal-proxy clones from the module proxy factory, and full primary
//! account proxies from the account factory. Both must reproduce the
//! factories' own derivations byte for byte; a deviation yields a wrong but
//! plausible-looking address, so the bytecode templates here are not
//! approximations.

use alloy_primitives::{keccak256, Address, U256};

use crate::salt::deployment_salt;

/// Minimal-proxy creation code up to the master copy address.
const CLONE_PREFIX: &[u8] = &[
    0x60, 0x2d, 0x80, 0x60, 0x09, 0x3d, 0x39, 0x3d, 0xf3, 0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d,
    0x3d, 0x36, 0x3d, 0x73,
];

/// Minimal-proxy creation code after the master copy address.
const CLONE_SUFFIX: &[u8] = &[
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];

/// Address the module proxy factory will assign to a clone of `master_copy`
/// deployed with `initializer` and `salt_nonce`.
pub fn predict_clone_address(
    master_copy: Address,
    factory: Address,
    initializer: &[u8],
    salt_nonce: U256,
) -> Address {
    let mut init_code = Vec::with_capacity(CLONE_PREFIX.len() + 20 + CLONE_SUFFIX.len());
    init_code.extend_from_slice(CLONE_PREFIX);
    init_code.extend_from_slice(master_copy.as_slice());
    init_code.extend_from_slice(CLONE_SUFFIX);

    factory.create2(
        deployment_salt(initializer, salt_nonce),
        keccak256(&init_code),
    )
}

/// Address the account proxy factory will assign to a primary account proxy.
///
/// The factory's creation code is read from the live contract once per run;
/// given that value the prediction is pure. The singleton address is appended
/// as a full word, exactly as the factory's deploy path does.
pub fn predict_account_address(
    proxy_creation_code: &[u8],
    factory: Address,
    singleton: Address,
    initializer: &[u8],
    salt_nonce: U256,
) -> Address {
    let mut init_code = Vec::with_capacity(proxy_creation_code.len() + 32);
    init_code.extend_from_slice(proxy_creation_code);
    init_code.extend_from_slice(&singleton.into_word().0);

    factory.create2(
        deployment_salt(initializer, salt_nonce),
        keccak256(&init_code),
    )
}
