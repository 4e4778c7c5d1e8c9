//! Salt nonces and deployment salts
//!
//! Every deployable gets a fresh 256-bit salt nonce; the factories (and the
//! address oracle) fold it together with the initializer into the actual
//! CREATE2 salt. Nonce generation sits behind a trait so tests and
//! reproducible dry runs can substitute a deterministic sequence.

use alloy_primitives::{keccak256, B256, U256};
use rand::rngs::OsRng;
use rand::RngCore;

/// Deployment salt: `keccak256(keccak256(initializer) ‖ salt_nonce)`.
///
/// This is the exact salt rule both deterministic-address factories apply,
/// so it is also the rule the address oracle must use.
pub fn deployment_salt(initializer: &[u8], salt_nonce: U256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(keccak256(initializer).as_slice());
    buf[32..].copy_from_slice(&salt_nonce.to_be_bytes::<32>());
    keccak256(buf)
}

/// Source of fresh 256-bit salt nonces
pub trait SaltSource {
    /// Draw the next salt nonce.
    fn next_salt_nonce(&mut self) -> U256;
}

/// OS-CSPRNG salt source used in production runs
#[derive(Debug, Default)]
pub struct OsSaltSource;

impl SaltSource for OsSaltSource {
    fn next_salt_nonce(&mut self) -> U256 {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        U256::from_be_bytes(bytes)
    }
}

/// Deterministic salt source for tests and reproducible dry runs
#[derive(Debug)]
pub struct SequentialSaltSource {
    next: u64,
}

impl SequentialSaltSource {
    /// Start the sequence at `first`.
    pub fn new(first: u64) -> Self {
        Self { next: first }
    }
}

impl SaltSource for SequentialSaltSource {
    fn next_salt_nonce(&mut self) -> U256 {
        let value = U256::from(self.next);
        self.next += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_salt_vector() {
        // keccak256(keccak256(0xdeadbeef) || uint256(1))
        let expected = "a51ea2ef77493dc3e6bd3769593137d0dcca234ca88003c0a45e54d3612bc871";
        let salt = deployment_salt(&[0xde, 0xad, 0xbe, 0xef], U256::from(1u64));
        assert_eq!(hex::encode(salt), expected);
    }

    #[test]
    fn test_deployment_salt_sensitive_to_both_inputs() {
        let base = deployment_salt(&[0xde, 0xad], U256::from(1u64));
        assert_ne!(base, deployment_salt(&[0xde, 0xae], U256::from(1u64)));
        assert_ne!(base, deployment_salt(&[0xde, 0xad], U256::from(2u64)));
    }

    #[test]
    fn test_os_source_draws_distinct_nonces() {
        let mut source = OsSaltSource;
        let a = source.next_salt_nonce();
        let b = source.next_salt_nonce();
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequential_source() {
        let mut source = SequentialSaltSource::new(10);
        assert_eq!(source.next_salt_nonce(), U256::from(10u64));
        assert_eq!(source.next_salt_nonce(), U256::from(11u64));
    }
}
