//! Token deployment planning
//!
//! One minimal-proxy clone of the token master copy, initialized with the
//! reconciled distribution. Minting targets predicted unit addresses that do
//! not exist yet; that is fine, balances do not require deployed code.

use alloy_primitives::Address;

use canopy_codec::factories::deploy_module_call;
use canopy_codec::modules::token_initializer;
use canopy_core::{Allocation, Call, ContractAddresses, TokenDescriptor};

use crate::predict::predict_clone_address;
use crate::salt::SaltSource;

/// Planned token deployment
#[derive(Debug, Clone)]
pub struct TokenPlan {
    /// The deploy call appended to the batch
    pub call: Call,
    /// Address the token clone will occupy
    pub predicted_address: Address,
}

/// Plan the token clone deployment for a reconciled distribution.
pub fn plan_token_deployment(
    contracts: &ContractAddresses,
    token: &TokenDescriptor,
    allocations: &[Allocation],
    salts: &mut dyn SaltSource,
) -> TokenPlan {
    let salt_nonce = salts.next_salt_nonce();
    let initializer = token_initializer(&token.name, &token.symbol, allocations);

    TokenPlan {
        call: deploy_module_call(
            contracts.module_proxy_factory,
            contracts.token_master_copy,
            &initializer,
            salt_nonce,
        ),
        predicted_address: predict_clone_address(
            contracts.token_master_copy,
            contracts.module_proxy_factory,
            &initializer,
            salt_nonce,
        ),
    }
}
