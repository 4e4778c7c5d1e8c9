//! Unified error system for Canopy
//!
//! One error type covers the whole pipeline. Every variant is terminal: a
//! failed run must abort before anything reaches the chain, so nothing here
//! is ever silently recovered.

use alloy_primitives::U256;

/// Unified error type for all Canopy operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum CanopyError {
    /// Missing or malformed configuration or manifest input
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was missing or malformed
        message: String,
    },

    /// Gathered allocations do not sum to the declared token supply
    #[error("Allocation mismatch: allocations sum to {computed}, token supply is {declared}")]
    AllocationMismatch {
        /// Sum of unit allocations plus external distribution entries
        computed: U256,
        /// Supply declared by the token descriptor
        declared: U256,
    },

    /// The one external contract read (or a later RPC exchange) failed
    #[error("External read failed: {message}")]
    ExternalRead {
        /// Transport or node error description
        message: String,
    },

    /// Encoding or decoding of a manifest or RPC payload failed
    #[error("Serialization error: {message}")]
    Serialization {
        /// What failed to encode or decode
        message: String,
    },
}

impl CanopyError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an external read error
    pub fn external_read(message: impl Into<String>) -> Self {
        Self::ExternalRead {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Standard Result type for Canopy operations
pub type Result<T> = std::result::Result<T, CanopyError>;
