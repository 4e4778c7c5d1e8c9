//! Meta-transaction type
//!
//! A [`Call`] is one entry in an atomic batch: operation kind, target,
//! attached value, and opaque calldata. Calls are immutable once constructed;
//! an ordered `Vec<Call>` is the unit of execution everywhere in the planner.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// How the batch executor invokes the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CallOperation {
    /// Plain `CALL`
    Call = 0,
    /// `DELEGATECALL` into the target
    DelegateCall = 1,
}

impl CallOperation {
    /// Wire tag used in packed batches and in `execTransaction`
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// One immutable call in an atomic batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Operation kind, normally [`CallOperation::Call`]
    pub operation: CallOperation,
    /// Target contract
    pub to: Address,
    /// Attached value, normally zero
    pub value: U256,
    /// Opaque calldata
    pub data: Bytes,
}

impl Call {
    /// Build a zero-value plain call
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            operation: CallOperation::Call,
            to,
            value: U256::ZERO,
            data: data.into(),
        }
    }
}
