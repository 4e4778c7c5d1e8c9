//! Unit name and sub-unit registry calls
//!
//! The registry records a unit's display name and its declared sub-units.
//! Both calls are made from inside the unit's own configuration batch, so
//! the registry sees the unit itself as the caller.

use alloy_primitives::Address;

use canopy_core::Call;

use crate::abi::{call_data, AbiValue};

const DECLARE_SUB_UNIT_SIG: &str = "declareSubDAO(address)";
const RECORD_NAME_SIG: &str = "updateDAOName(string)";

/// Declare `sub_unit` as a child of the calling unit.
pub fn declare_sub_unit_call(registry: Address, sub_unit: Address) -> Call {
    Call::call(
        registry,
        call_data(DECLARE_SUB_UNIT_SIG, &[AbiValue::Address(sub_unit)]),
    )
}

/// Record the calling unit's display name.
pub fn record_name_call(registry: Address, name: &str) -> Call {
    Call::call(
        registry,
        call_data(RECORD_NAME_SIG, &[AbiValue::String(name.to_owned())]),
    )
}
