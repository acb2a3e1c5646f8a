//! Interactive schedule repair.
//!
//! Validates and performs operator-driven relocations of lesson slots:
//! [`propose_move`] handles the direct two-party move/swap, and
//! [`find_chain_swap`] searches for a three-party rotation when the direct
//! operation is infeasible. Both are pure functions: they never mutate the
//! input grid, and an infeasible request is an ordinary
//! [`SwapResult`] with `success == false`, not an error.
//!
//! Teacher soft constraints (daily load, exclusions) are deliberately not
//! re-checked here; proposals are optimistic and meant for human review.
//! Callers that want a hard guarantee run
//! [`crate::validation::audit_grid`] on the proposed grid before
//! committing it.

mod chain;
mod swap;

pub use chain::find_chain_swap;
pub use swap::propose_move;

use serde::Serialize;

use crate::grid::Grid;

/// Outcome of a proposed move, swap, or chain swap.
#[derive(Debug, Clone, Serialize)]
pub struct SwapResult {
    /// Whether the operation is feasible.
    pub success: bool,
    /// Human-readable failure reason, for direct display to the operator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The resulting grid, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_grid: Option<Grid>,
    /// Whether this is a three-party chain swap.
    pub is_chain: bool,
    /// Human-readable description of each relocation.
    pub steps: Vec<String>,
    /// Teachers whose rows change.
    pub related_teacher_ids: Vec<String>,
}

impl SwapResult {
    /// An infeasible operation. No state changes; fully recoverable.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
            new_grid: None,
            is_chain: false,
            steps: Vec::new(),
            related_teacher_ids: Vec::new(),
        }
    }

    pub(crate) fn direct(grid: Grid, step: String, related: Vec<String>) -> Self {
        Self {
            success: true,
            reason: None,
            new_grid: Some(grid),
            is_chain: false,
            steps: vec![step],
            related_teacher_ids: related,
        }
    }

    pub(crate) fn chain(grid: Grid, steps: Vec<String>, related: Vec<String>) -> Self {
        Self {
            success: true,
            reason: None,
            new_grid: Some(grid),
            is_chain: true,
            steps,
            related_teacher_ids: related,
        }
    }
}
