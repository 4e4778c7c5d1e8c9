//! Deterministic-address factory calls
//!
//! Primary accounts deploy through the account proxy factory; every
//! governance module (and the token) deploys as a minimal-proxy clone through
//! the module proxy factory. Both factories take the initializer and salt
//! nonce that the address oracle folds into its prediction, which is what
//! keeps predicted and actual addresses in lockstep.

use alloy_primitives::{Address, Bytes, U256};

use canopy_core::Call;

use crate::abi::{call_data, selector, AbiValue};

const CREATE_PROXY_WITH_NONCE_SIG: &str = "createProxyWithNonce(address,bytes,uint256)";
const PROXY_CREATION_CODE_SIG: &str = "proxyCreationCode()";
const DEPLOY_MODULE_SIG: &str = "deployModule(address,bytes,uint256)";

/// Deploy a unit's primary account proxy.
pub fn deploy_account_call(
    factory: Address,
    singleton: Address,
    initializer: &Bytes,
    salt_nonce: U256,
) -> Call {
    Call::call(
        factory,
        call_data(
            CREATE_PROXY_WITH_NONCE_SIG,
            &[
                AbiValue::Address(singleton),
                AbiValue::Bytes(initializer.to_vec()),
                AbiValue::Uint(salt_nonce),
            ],
        ),
    )
}

/// Deploy a minimal-proxy clone of a module master copy.
pub fn deploy_module_call(
    factory: Address,
    master_copy: Address,
    initializer: &Bytes,
    salt_nonce: U256,
) -> Call {
    Call::call(
        factory,
        call_data(
            DEPLOY_MODULE_SIG,
            &[
                AbiValue::Address(master_copy),
                AbiValue::Bytes(initializer.to_vec()),
                AbiValue::Uint(salt_nonce),
            ],
        ),
    )
}

/// Calldata for the account factory's `proxyCreationCode()` read.
pub fn proxy_creation_code_call_data() -> Bytes {
    selector(PROXY_CREATION_CODE_SIG).to_vec().into()
}
