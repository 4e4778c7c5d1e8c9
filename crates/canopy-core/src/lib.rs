//! Canopy core - domain model for atomic organizational deployments
//!
//! This crate holds the input and derived data model shared by the planner,
//! codec, client, and CLI: the organizational unit tree, the meta-transaction
//! type, token and allocation records, the per-chain contract address book,
//! and the unified error type.
//!
//! Everything here is plain data. The two tree shapes (`OrgUnit` before
//! derivation, `DerivedUnit` after) are distinct immutable types connected by
//! a pure mapping in `canopy-plan`; nothing in this crate mutates in place.

#![forbid(unsafe_code)]

/// Meta-transaction type executed by the batch contract
pub mod call;

/// Per-chain deployed contract address book
pub mod chains;

/// Unified error handling
pub mod error;

/// Freeze governance parameters shared by every non-root unit
pub mod freeze;

/// Deployment manifest parsing and validation
pub mod manifest;

/// Token descriptor and allocation entries
pub mod token;

/// Organizational unit tree, before and after derivation
pub mod unit;

pub use call::{Call, CallOperation};
pub use chains::{Chain, ContractAddresses};
pub use error::{CanopyError, Result};
pub use freeze::FreezeConfig;
pub use manifest::Manifest;
pub use token::{Allocation, TokenDescriptor};
pub use unit::{DerivedData, DerivedUnit, OrgUnit};
