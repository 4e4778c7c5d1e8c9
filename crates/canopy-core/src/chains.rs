//! Per-chain deployed contract address book
//!
//! Every external contract Canopy talks to is a fixed singleton already
//! deployed on the target chain. The tables below are the canonical
//! deployments per supported chain; nothing in a run ever writes to them.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::error::CanopyError;

/// Supported target chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Base mainnet
    Base,
    /// Sepolia testnet
    Sepolia,
}

impl Chain {
    /// EIP-155 chain id
    pub fn id(self) -> u64 {
        match self {
            Chain::Base => 8453,
            Chain::Sepolia => 11155111,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Base => write!(f, "base"),
            Chain::Sepolia => write!(f, "sepolia"),
        }
    }
}

impl FromStr for Chain {
    type Err = CanopyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Chain::Base),
            "sepolia" => Ok(Chain::Sepolia),
            other => Err(CanopyError::configuration(format!(
                "chain \"{other}\" not supported (expected base or sepolia)"
            ))),
        }
    }
}

/// Fixed singleton deployments a run plans against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    /// Primary account proxy factory
    pub account_proxy_factory: Address,
    /// Primary account implementation behind every proxy
    pub account_singleton: Address,
    /// Fallback handler wired into every account setup
    pub fallback_handler: Address,
    /// Call-only multisend executor; also the bootstrap co-owner
    pub multisend_call_only: Address,
    /// Minimal-proxy clone factory for all governance modules
    pub module_proxy_factory: Address,
    /// Inter-unit control module master copy
    pub org_module_master_copy: Address,
    /// Freeze voting module master copy
    pub freeze_voting_master_copy: Address,
    /// Freeze guard master copy
    pub freeze_guard_master_copy: Address,
    /// Token implementation master copy
    pub token_master_copy: Address,
    /// Name and sub-unit registry
    pub registry: Address,
}

impl ContractAddresses {
    /// Canonical deployments for `chain`
    pub fn for_chain(chain: Chain) -> Self {
        match chain {
            Chain::Base => Self {
                account_proxy_factory: address!("c22834581ebc8527d974f8a1c97e1bea4ef910bc"),
                account_singleton: address!("fb1bffc9d739b8d520daf37df666da4c687191ea"),
                fallback_handler: address!("017062a1de2fe6b99be3d9d37841fed19f573804"),
                multisend_call_only: address!("a1dabef33b3b82c7814b6d82a79e50f4ac44102b"),
                module_proxy_factory: address!("000000000000addb49795b0f9ba5bc298cdda236"),
                org_module_master_copy: address!("87326a981fc56823e26599ff4d0a4eceafff3be0"),
                freeze_voting_master_copy: address!("fe376aad5bb1c3ce27fb27ece130f7b0ba8d9642"),
                freeze_guard_master_copy: address!("cd6c149b3c0fe7284005869fa15080e85887c8f1"),
                token_master_copy: address!("7be7b12da74d48e541131db1626ee651a2105c45"),
                registry: address!("023bdaefeddddd5b43af125caa8007a99a886fd3"),
            },
            Chain::Sepolia => Self {
                account_proxy_factory: address!("c22834581ebc8527d974f8a1c97e1bea4ef910bc"),
                account_singleton: address!("fb1bffc9d739b8d520daf37df666da4c687191ea"),
                fallback_handler: address!("017062a1de2fe6b99be3d9d37841fed19f573804"),
                multisend_call_only: address!("a1dabef33b3b82c7814b6d82a79e50f4ac44102b"),
                module_proxy_factory: address!("000000000000addb49795b0f9ba5bc298cdda236"),
                org_module_master_copy: address!("1b26345a4a41d9f588e1b161b6e8f21d27547184"),
                freeze_voting_master_copy: address!("10aff1beb279c6b0077eee0db2f0cc9cedd4c507"),
                freeze_guard_master_copy: address!("4b3c155c9bb21f482e894b4321ac4d2dcf4a6746"),
                token_master_copy: address!("51c852bdf6ed00baca4225ee940b426a56853ec9"),
                registry: address!("4791ff2a6e84f012402c0679c12cb1d9260450a6"),
            },
        }
    }
}
