//! Atomic batch packing
//!
//! The multisend executor takes one opaque `bytes` argument: every call
//! packed as a fixed-width header (operation tag, target, value, calldata
//! length) followed by the raw calldata, with nothing between entries. The
//! packing is order-preserving; the executor runs entries strictly in
//! sequence and reverts the whole batch if any entry reverts.

use alloy_primitives::{Address, Bytes, U256};

use canopy_core::error::{CanopyError, Result};
use canopy_core::{Call, CallOperation};

use crate::abi::{call_data, AbiValue};

const MULTI_SEND_SIG: &str = "multiSend(bytes)";

/// Header bytes per packed call: 1 op + 20 target + 32 value + 32 length.
pub const CALL_HEADER_LEN: usize = 85;

/// Pack an ordered call sequence into the executor's wire format.
pub fn pack_batch(calls: &[Call]) -> Bytes {
    let total = calls
        .iter()
        .map(|call| CALL_HEADER_LEN + call.data.len())
        .sum();
    let mut out = Vec::with_capacity(total);

    for call in calls {
        out.push(call.operation.tag());
        out.extend_from_slice(call.to.as_slice());
        out.extend_from_slice(&call.value.to_be_bytes::<32>());
        out.extend_from_slice(&U256::from(call.data.len()).to_be_bytes::<32>());
        out.extend_from_slice(&call.data);
    }

    out.into()
}

/// Inverse of [`pack_batch`].
///
/// The wire format is write-only in production; this exists so tests and
/// diagnostics can take a packed batch apart again.
pub fn unpack_batch(data: &[u8]) -> Result<Vec<Call>> {
    let mut calls = Vec::new();
    let mut at = 0;

    while at < data.len() {
        if data.len() - at < CALL_HEADER_LEN {
            return Err(CanopyError::serialization("packed batch truncated header"));
        }
        let operation = match data[at] {
            0 => CallOperation::Call,
            1 => CallOperation::DelegateCall,
            tag => {
                return Err(CanopyError::serialization(format!(
                    "packed batch has unknown operation tag {tag}"
                )))
            }
        };
        let to = Address::from_slice(&data[at + 1..at + 21]);
        let value = U256::from_be_slice(&data[at + 21..at + 53]);
        let len = U256::from_be_slice(&data[at + 53..at + 85]);
        let len = usize::try_from(len)
            .map_err(|_| CanopyError::serialization("packed batch length overflows"))?;

        let start = at + CALL_HEADER_LEN;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| CanopyError::serialization("packed batch truncated calldata"))?;

        calls.push(Call {
            operation,
            to,
            value,
            data: data[start..end].to_vec().into(),
        });
        at = end;
    }

    Ok(calls)
}

/// Full `multiSend` calldata for an ordered call sequence.
pub fn multi_send_calldata(calls: &[Call]) -> Bytes {
    call_data(
        MULTI_SEND_SIG,
        &[AbiValue::Bytes(pack_batch(calls).to_vec())],
    )
}
