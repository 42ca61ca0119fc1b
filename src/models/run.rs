//! Run result models.
//!
//! A run produces final slot commits, the per-slot assignment lists that
//! led to them, and a summary suitable for a user-facing notification.
//! These records are the engine's only outward effect — job state itself
//! is never mutated in place.

use serde::{Deserialize, Serialize};

/// A final commitment of a fully-allocated job to a lay slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCommit {
    /// Committed job.
    pub job_id: String,
    /// Destination lane.
    pub slot_id: String,
}

/// One slot's worth of recorded allocations, in commit order.
///
/// Preserves the grouping decisions made during the run so finalization
/// replays them instead of re-deriving slot membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// Destination lane.
    pub slot_id: String,
    /// Number of sheets routed into this lane.
    pub sheets: u32,
    /// `(job_id, quantity)` pairs, one per draw, in commit order.
    pub items: Vec<(String, u32)>,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total units allocated across all jobs.
    pub total_allocated: u32,
    /// Jobs whose full remaining quantity was allocated and committed.
    pub jobs_committed: usize,
    /// Units left unallocated at the end of the run.
    pub unallocated: u32,
}

/// Complete result of one ganging run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Final slot commits, the caller's write-back list.
    pub commits: Vec<SlotCommit>,
    /// Per-slot assignment lists, in slot consumption order.
    pub assignments: Vec<SlotAssignment>,
    /// Run totals.
    pub summary: RunSummary,
}

impl RunReport {
    /// Finds the commit for a job, if it was committed.
    pub fn commit_for(&self, job_id: &str) -> Option<&SlotCommit> {
        self.commits.iter().find(|c| c.job_id == job_id)
    }

    /// Total quantity recorded for a job across all slot assignments.
    pub fn recorded_quantity(&self, job_id: &str) -> u32 {
        self.assignments
            .iter()
            .flat_map(|a| a.items.iter())
            .filter(|(id, _)| id == job_id)
            .map(|(_, qty)| qty)
            .sum()
    }

    /// Total number of sheets produced by the run.
    pub fn sheet_count(&self) -> u32 {
        self.assignments.iter().map(|a| a.sheets).sum()
    }
}
