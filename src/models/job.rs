//! Job model.
//!
//! A job is a unit of print demand to be ganged: a product type, an
//! optional color, a physical transfer size, a quantity, and an optional
//! deadline. The engine consumes jobs as immutable snapshots — the only
//! write back to the outside world is the final slot commit emitted by
//! the finalizer.

use serde::{Deserialize, Serialize};

/// Transfer product type.
///
/// Determines sheet-sharing compatibility: Zero transfers are always
/// printed alone, the other types mix according to the rules in
/// [`crate::grouping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    FullColour,
    SingleColour,
    Metal,
    Zero,
}

/// Color tag for single-colour (and metal) transfers.
///
/// Only `White` and `Silver` carry cross-compatibility meaning; the rest
/// matter for strict same-color grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorVariant {
    White,
    Black,
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Silver,
    Gold,
}

/// Physical transfer size.
///
/// Nine production sizes; [`TransferSize::A3`] is the sheet-native size
/// and can never be ganged with anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferSize {
    A3,
    A4,
    A5,
    A6,
    #[serde(rename = "295x100")]
    S295x100,
    #[serde(rename = "95x95")]
    S95x95,
    #[serde(rename = "100x70")]
    S100x70,
    #[serde(rename = "60x60")]
    S60x60,
    #[serde(rename = "290x140")]
    S290x140,
}

impl TransferSize {
    /// All sizes, in catalog order.
    pub const ALL: [TransferSize; 9] = [
        TransferSize::A3,
        TransferSize::A4,
        TransferSize::A5,
        TransferSize::A6,
        TransferSize::S295x100,
        TransferSize::S95x95,
        TransferSize::S100x70,
        TransferSize::S60x60,
        TransferSize::S290x140,
    ];

    /// Whether this is the sheet-native, un-gangable size.
    #[inline]
    pub fn is_native(self) -> bool {
        self == TransferSize::A3
    }
}

/// A print job snapshot.
///
/// # Time Representation
/// Deadlines are in milliseconds relative to a scheduling epoch (t=0),
/// the same convention the engine's `now_ms` clock uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier, stable across a run.
    pub id: String,
    /// Transfer product type.
    pub product_type: ProductType,
    /// Color tag. Meaningful for single-colour and metal compatibility.
    pub color: Option<ColorVariant>,
    /// Physical transfer size.
    pub size: TransferSize,
    /// Total units required (≥ 1).
    pub quantity: u32,
    /// Latest completion time (ms). `None` = no deadline.
    pub deadline: Option<i64>,
    /// Lay slot the job is already resting in, if any. A job with a
    /// current slot is terminal and invisible to scheduling.
    pub current_slot: Option<String>,
    /// Cost-configuration group key (e.g., the owning project).
    /// `None` uses the default cost configuration.
    pub cost_group: Option<String>,
}

impl Job {
    /// Creates a new job with quantity 1 and no deadline.
    pub fn new(id: impl Into<String>, product_type: ProductType, size: TransferSize) -> Self {
        Self {
            id: id.into(),
            product_type,
            color: None,
            size,
            quantity: 1,
            deadline: None,
            current_slot: None,
            cost_group: None,
        }
    }

    /// Sets the color variant.
    pub fn with_color(mut self, color: ColorVariant) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the total quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the deadline (ms).
    pub fn with_deadline(mut self, deadline_ms: i64) -> Self {
        self.deadline = Some(deadline_ms);
        self
    }

    /// Marks the job as already resting in a lay slot.
    pub fn with_current_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.current_slot = Some(slot_id.into());
        self
    }

    /// Sets the cost-configuration group.
    pub fn with_cost_group(mut self, group: impl Into<String>) -> Self {
        self.cost_group = Some(group.into());
        self
    }

    /// Quantity still to be allocated: 0 once the job rests in a lay slot,
    /// otherwise the full quantity. Partial allocations within a run are
    /// tracked run-locally, never on the job itself.
    pub fn remaining_quantity(&self) -> u32 {
        if self.current_slot.is_some() {
            0
        } else {
            self.quantity
        }
    }

    /// Whether the job is already committed to a lay slot.
    #[inline]
    pub fn is_laid(&self) -> bool {
        self.current_slot.is_some()
    }
}
