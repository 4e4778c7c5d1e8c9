//! Governance module and token initializer payloads
//!
//! Each master copy exposes `setUp(bytes)`; the inner bytes are the
//! ABI-encoded constructor arguments of that particular module. These
//! initializer payloads feed both the `deployModule` calls and the clone
//! address predictions, so their byte layout is part of the address space.

use alloy_primitives::{Address, Bytes, U256};

use canopy_core::{Allocation, FreezeConfig};

use crate::abi::{call_data, encode_params, AbiValue};

const SET_UP_SIG: &str = "setUp(bytes)";

fn set_up(inner: Vec<u8>) -> Bytes {
    call_data(SET_UP_SIG, &[AbiValue::Bytes(inner)])
}

/// Inter-unit control module initializer.
///
/// The parent owns the module; the unit is both avatar and target, with no
/// extra controllers.
pub fn org_module_initializer(parent: Address, unit: Address) -> Bytes {
    set_up(encode_params(&[
        AbiValue::Address(parent),
        AbiValue::Address(unit),
        AbiValue::Address(unit),
        AbiValue::AddressArray(Vec::new()),
    ]))
}

/// Freeze voting module initializer.
///
/// Votes are cast by the parent's owners, so the vote threshold is the
/// parent's approval threshold; the periods are global freeze configuration.
pub fn freeze_voting_initializer(
    parent: Address,
    parent_threshold: u64,
    freeze: &FreezeConfig,
) -> Bytes {
    set_up(encode_params(&[
        AbiValue::Address(parent),
        AbiValue::Uint(U256::from(parent_threshold)),
        AbiValue::Uint(U256::from(freeze.freeze_proposal_period)),
        AbiValue::Uint(U256::from(freeze.freeze_period)),
        AbiValue::Address(parent),
    ]))
}

/// Freeze guard initializer.
///
/// Binds the guard to the unit it protects, the parent that can veto, and
/// the freeze voting clone deployed in the same batch.
pub fn freeze_guard_initializer(
    unit: Address,
    parent: Address,
    freeze_voting: Address,
    freeze: &FreezeConfig,
) -> Bytes {
    set_up(encode_params(&[
        AbiValue::Uint(U256::from(freeze.timelock_period)),
        AbiValue::Uint(U256::from(freeze.execution_period)),
        AbiValue::Address(parent),
        AbiValue::Address(freeze_voting),
        AbiValue::Address(unit),
    ]))
}

/// Token initializer minting the full initial distribution.
pub fn token_initializer(name: &str, symbol: &str, allocations: &[Allocation]) -> Bytes {
    set_up(encode_params(&[
        AbiValue::String(name.to_owned()),
        AbiValue::String(symbol.to_owned()),
        AbiValue::AddressArray(allocations.iter().map(|a| a.address).collect()),
        AbiValue::UintArray(allocations.iter().map(|a| a.amount).collect()),
    ]))
}
