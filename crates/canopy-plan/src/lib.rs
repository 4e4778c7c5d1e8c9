//! Canopy planner - deterministic addresses and atomic batch assembly
//!
//! Turns a deployment manifest into one submittable multisend payload:
//!
//! 1. *Derivation pass* - every unit gets a salt nonce, its setup
//!    initializer, and its predicted address ([`derive`]).
//! 2. *Reconciliation* - unit allocations plus external entries must equal
//!    the token supply exactly, or nothing is assembled ([`reconcile`]).
//! 3. *Assembly pass* - strict pre-order flattening into top-level calls
//!    ([`assemble`]), then the token deployment ([`token`]).
//! 4. The packed batch ([`canopy_codec::multisend`]) is the run's product.
//!
//! Everything is pure computation over the manifest, the chain address book,
//! and the one externally read value (the account factory's proxy creation
//! code); any error aborts the run before anything touches the chain.

#![forbid(unsafe_code)]

/// Assembly pass: derived tree to ordered call sequence
pub mod assemble;

/// Derivation pass: raw tree to derived tree
pub mod derive;

/// CREATE2 address oracle
pub mod predict;

/// Allocation reconciliation gate
pub mod reconcile;

/// Salt nonces and deployment salts
pub mod salt;

/// Token deployment planning
pub mod token;

use alloy_primitives::{Address, Bytes, U256};

use canopy_codec::multisend::multi_send_calldata;
use canopy_core::error::Result;
use canopy_core::{Call, ContractAddresses, DerivedUnit, Manifest};

use crate::assemble::{assemble_tree, AssembleContext};
use crate::derive::{derive_tree, DeriveContext};
use crate::reconcile::reconcile;
use crate::salt::SaltSource;
use crate::token::plan_token_deployment;

/// One row of the predicted address table
#[derive(Debug, Clone)]
pub struct PlannedUnit {
    /// Unit display name
    pub name: String,
    /// Predicted account address
    pub address: Address,
    /// Token amount minted to the unit, in base units
    pub allocation: U256,
}

/// Complete plan for one atomic deployment
#[derive(Debug, Clone)]
pub struct Plan {
    /// Predicted address per unit, pre-order
    pub units: Vec<PlannedUnit>,
    /// Predicted token address
    pub token_address: Address,
    /// Flat top-level call sequence, units pre-order then the token deploy
    pub calls: Vec<Call>,
    /// `multiSend` calldata for the whole sequence
    pub batch: Bytes,
}

/// Plan an entire deployment from a validated manifest.
///
/// `proxy_creation_code` is the account factory's creation code, read from
/// the live contract once before planning; given that value this function is
/// pure apart from salt nonce generation.
pub fn plan(
    contracts: &ContractAddresses,
    manifest: &Manifest,
    proxy_creation_code: &[u8],
    salts: &mut dyn SaltSource,
) -> Result<Plan> {
    let derive_ctx = DeriveContext {
        contracts,
        proxy_creation_code,
    };
    let derived = derive_tree(&manifest.root, &derive_ctx, salts);

    // The reconciliation gate runs before any assembly: a mismatched
    // distribution must never produce a submittable payload.
    let allocations = reconcile(&derived, &manifest.airdrops, manifest.token.supply)?;

    let assemble_ctx = AssembleContext {
        contracts,
        freeze: &manifest.freeze,
    };
    let mut calls = assemble_tree(&assemble_ctx, &derived)?;

    let token_plan = plan_token_deployment(contracts, &manifest.token, &allocations, salts);
    calls.push(token_plan.call);

    let batch = multi_send_calldata(&calls);
    let units = unit_table(&derived);

    tracing::info!(
        units = units.len(),
        calls = calls.len(),
        batch_bytes = batch.len(),
        token = %token_plan.predicted_address,
        "planned deployment"
    );

    Ok(Plan {
        units,
        token_address: token_plan.predicted_address,
        calls,
        batch,
    })
}

fn unit_table(root: &DerivedUnit) -> Vec<PlannedUnit> {
    let mut units = Vec::with_capacity(root.count());
    root.walk(&mut |unit| {
        units.push(PlannedUnit {
            name: unit.name.clone(),
            address: unit.derived.predicted_address,
            allocation: unit.allocation,
        });
    });
    units
}
