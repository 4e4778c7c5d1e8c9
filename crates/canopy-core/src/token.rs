//! Token descriptor and allocation entries

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Base units per whole token; the token implementation fixes 18 decimals.
pub const TOKEN_DECIMALS: u8 = 18;

/// Fungible token deployed alongside the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// Token name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Total supply in base units; must equal the sum of all allocations
    pub supply: U256,
}

/// One (recipient, amount) entry of the initial distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Recipient address
    pub address: Address,
    /// Amount in base units
    pub amount: U256,
}

/// Scale a whole-token amount into base units.
pub fn to_base_units(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}
