//! Ganging domain models.
//!
//! Core data types for a ganging run: the read-only [`Job`] snapshot the
//! engine consumes, the [`OutputSlot`] lay lanes it fills, and the
//! [`RunReport`] it produces. Jobs are immutable value snapshots — slot
//! commits are expressed as an explicit output list, never as in-place
//! mutation, to keep the engine side-effect-free and testable.

mod job;
mod run;
mod slot;

pub use job::{ColorVariant, Job, ProductType, TransferSize};
pub use run::{RunReport, RunSummary, SlotAssignment, SlotCommit};
pub use slot::{build_slot_queue, OutputSlot};
