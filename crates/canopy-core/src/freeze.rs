//! Freeze governance parameters
//!
//! Shared, read-only configuration for every non-root unit's freeze voting
//! and freeze guard deployment. Injected once at the planner entry point and
//! never mutated during a run.
//!
//! The vote threshold of each freeze voting module is wired to the parent
//! unit's approval threshold at assembly time; the periods below are global.

use serde::{Deserialize, Serialize};

/// Global freeze voting/guard parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeConfig {
    /// Seconds a freeze proposal stays open for votes
    pub freeze_proposal_period: u32,
    /// Seconds a successful freeze lasts
    pub freeze_period: u32,
    /// Seconds a queued transaction must wait before execution
    pub timelock_period: u32,
    /// Seconds a queued transaction stays executable after the timelock
    pub execution_period: u32,
}
