//! Minimal ABI encoding
//!
//! The external interfaces only use a handful of parameter shapes, so the
//! encoder supports exactly those: static words (address, uint), dynamic
//! `bytes`/`string`, and one-dimensional arrays of static elements. Layout is
//! the standard head/tail scheme: one 32-byte head word per parameter, with
//! dynamic parameters writing an offset into the head and their content into
//! the tail.

use alloy_primitives::{keccak256, Address, Bytes, U256};

use canopy_core::error::{CanopyError, Result};

/// One ABI parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// `address`, left-padded to a word
    Address(Address),
    /// Any `uintN`; all widths occupy one big-endian word
    Uint(U256),
    /// Dynamic `bytes`
    Bytes(Vec<u8>),
    /// Dynamic `string` (UTF-8 bytes)
    String(String),
    /// `address[]`
    AddressArray(Vec<Address>),
    /// `uint256[]`
    UintArray(Vec<U256>),
}

impl AbiValue {
    fn is_dynamic(&self) -> bool {
        matches!(
            self,
            AbiValue::Bytes(_)
                | AbiValue::String(_)
                | AbiValue::AddressArray(_)
                | AbiValue::UintArray(_)
        )
    }

    fn head_word(&self) -> [u8; 32] {
        match self {
            AbiValue::Address(addr) => addr.into_word().0,
            AbiValue::Uint(value) => value.to_be_bytes::<32>(),
            _ => unreachable!("dynamic values encode through the tail"),
        }
    }

    fn tail(&self) -> Vec<u8> {
        match self {
            AbiValue::Bytes(data) => length_prefixed(data),
            AbiValue::String(text) => length_prefixed(text.as_bytes()),
            AbiValue::AddressArray(items) => {
                let mut out = U256::from(items.len()).to_be_bytes::<32>().to_vec();
                for item in items {
                    out.extend_from_slice(&item.into_word().0);
                }
                out
            }
            AbiValue::UintArray(items) => {
                let mut out = U256::from(items.len()).to_be_bytes::<32>().to_vec();
                for item in items {
                    out.extend_from_slice(&item.to_be_bytes::<32>());
                }
                out
            }
            _ => unreachable!("static values encode through the head"),
        }
    }
}

/// Length word followed by content, zero-padded to a word boundary.
fn length_prefixed(data: &[u8]) -> Vec<u8> {
    let mut out = U256::from(data.len()).to_be_bytes::<32>().to_vec();
    out.extend_from_slice(data);
    let rem = data.len() % 32;
    if rem != 0 {
        out.extend(std::iter::repeat(0u8).take(32 - rem));
    }
    out
}

/// Four-byte function selector for a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// ABI-encode a parameter list (head/tail layout, no selector).
pub fn encode_params(values: &[AbiValue]) -> Vec<u8> {
    let head_len = 32 * values.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for value in values {
        if value.is_dynamic() {
            let offset = U256::from(head_len + tail.len());
            head.extend_from_slice(&offset.to_be_bytes::<32>());
            tail.extend_from_slice(&value.tail());
        } else {
            head.extend_from_slice(&value.head_word());
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// Full calldata: selector plus encoded parameters.
pub fn call_data(signature: &str, values: &[AbiValue]) -> Bytes {
    let mut out = selector(signature).to_vec();
    out.extend_from_slice(&encode_params(values));
    out.into()
}

/// Decode a return value consisting of a single dynamic `bytes`.
///
/// Used for the one external read a run performs (`proxyCreationCode()`).
pub fn decode_bytes_return(data: &[u8]) -> Result<Vec<u8>> {
    let word = |at: usize| -> Result<usize> {
        let end = at
            .checked_add(32)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| CanopyError::serialization("bytes return truncated"))?;
        let value = U256::from_be_slice(&data[at..end]);
        usize::try_from(value)
            .map_err(|_| CanopyError::serialization("bytes return offset overflows"))
    };

    let offset = word(0)?;
    let len = word(offset)?;
    let start = offset + 32;
    let end = start
        .checked_add(len)
        .filter(|end| *end <= data.len())
        .ok_or_else(|| CanopyError::serialization("bytes return truncated"))?;
    Ok(data[start..end].to_vec())
}
