//! Organizational unit tree
//!
//! [`OrgUnit`] is the raw input shape: a strict tree where each unit
//! exclusively owns its children. [`DerivedUnit`] is the same tree after the
//! derivation pass, with every node carrying its [`DerivedData`]. The two are
//! deliberately separate types so planning code can only read addresses that
//! the derivation pass has actually produced.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// One multi-owner account in the organizational hierarchy, pre-derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    /// Registered display name
    pub name: String,
    /// Ordered owner set, non-empty
    pub owners: Vec<Address>,
    /// Approvals required to act once bootstrap is removed
    pub threshold: u64,
    /// Token amount minted to this unit, in base units
    pub allocation: U256,
    /// Sub-units, may be empty
    pub children: Vec<OrgUnit>,
}

/// Deterministic deployment data attached to a unit by the derivation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedData {
    /// Fresh 256-bit salt nonce, unique to this unit
    pub salt_nonce: U256,
    /// Account setup calldata, including the bootstrap co-owner
    pub initialization_data: Bytes,
    /// Address the factory will assign on first deployment
    pub predicted_address: Address,
}

/// A unit paired with its derived deployment data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedUnit {
    /// Registered display name
    pub name: String,
    /// Ordered owner set, non-empty
    pub owners: Vec<Address>,
    /// Approvals required to act once bootstrap is removed
    pub threshold: u64,
    /// Token amount minted to this unit, in base units
    pub allocation: U256,
    /// Deterministic deployment data for this unit
    pub derived: DerivedData,
    /// Sub-units carrying their own derived data
    pub children: Vec<DerivedUnit>,
}

impl OrgUnit {
    /// Number of units in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OrgUnit::count).sum::<usize>()
    }
}

impl DerivedUnit {
    /// Number of units in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DerivedUnit::count).sum::<usize>()
    }

    /// Pre-order walk over this subtree
    pub fn walk(&self, visit: &mut impl FnMut(&DerivedUnit)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
