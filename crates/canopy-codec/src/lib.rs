//! Canopy codec - byte-exact calldata for the fixed external contracts
//!
//! Every contract a run touches is an already-deployed singleton with a fixed
//! interface, so calldata construction is direct: a selector from the real
//! function signature plus ABI-encoded arguments. This crate also packs call
//! sequences into the one opaque blob the multisend executor expects.
//!
//! The encodings here must match the on-chain contracts byte for byte; a
//! deviation does not fail loudly, it yields a plausible-looking transaction
//! that deploys to the wrong addresses.

#![forbid(unsafe_code)]

/// Minimal ABI encoding: selectors, head/tail parameter layout
pub mod abi;

/// Primary account calls: setup, exec, module and guard wiring
pub mod account;

/// Deterministic-address factory calls
pub mod factories;

/// Governance module and token initializer payloads
pub mod modules;

/// Unit name and sub-unit registry calls
pub mod registry;

/// Atomic batch packing for the multisend executor
pub mod multisend;
