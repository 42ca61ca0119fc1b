//! Curated layout template catalog.
//!
//! A template is a predefined mix of transfer sizes and counts known to
//! pack a sheet well. The curated list is validated against the shelf
//! packer at build time: layouts the sheet geometry cannot actually hold
//! (including the intentionally oversized max-density entry) are dropped,
//! and survivors carry their computed utilization.

use serde::{Deserialize, Serialize};

use crate::models::TransferSize;
use crate::packing;

/// A validated layout template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutTemplate {
    /// Human-readable label, e.g. `2×A5 + 2×A6 + 4×100x70`.
    pub name: String,
    /// Required count per size, in declared order.
    pub layout: Vec<(TransferSize, u32)>,
    /// Static efficiency-tier weight. Higher tiers are tried first.
    pub weight: f64,
    /// Computed sheet utilization, in `(0, 1]`.
    pub utilization: f64,
}

impl LayoutTemplate {
    /// Required count for a size, 0 if the size is not in the layout.
    pub fn required(&self, size: TransferSize) -> u32 {
        self.layout
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Total item count across all sizes.
    pub fn item_count(&self) -> u32 {
        self.layout.iter().map(|(_, n)| n).sum()
    }
}

struct Candidate {
    name: &'static str,
    layout: &'static [(TransferSize, u32)],
    weight: f64,
}

/// The hand-curated candidate list, in efficiency-tier order.
///
/// Counts are physically verified combinations from production, except
/// the final max-density entry whose count is a deliberate over-ask: the
/// packer's feasibility check rejects it, and single-size maximums are
/// re-derived per size by the selector's fallback instead.
const CANDIDATES: &[Candidate] = &[
    Candidate {
        name: "1×A4 + 1×A5 + 4×100x70",
        layout: &[
            (TransferSize::A4, 1),
            (TransferSize::A5, 1),
            (TransferSize::S100x70, 4),
        ],
        weight: 3.0,
    },
    Candidate {
        name: "2×A5 + 2×A6 + 4×100x70",
        layout: &[
            (TransferSize::A5, 2),
            (TransferSize::A6, 2),
            (TransferSize::S100x70, 4),
        ],
        weight: 3.0,
    },
    Candidate {
        name: "1×A4 + 2×A6 + 8×100x70",
        layout: &[
            (TransferSize::A4, 1),
            (TransferSize::A6, 2),
            (TransferSize::S100x70, 8),
        ],
        weight: 3.0,
    },
    Candidate {
        name: "1×A5 + 3×A6 + 6×100x70",
        layout: &[
            (TransferSize::A5, 1),
            (TransferSize::A6, 3),
            (TransferSize::S100x70, 6),
        ],
        weight: 2.0,
    },
    Candidate {
        name: "1×A4 + 6×95x95",
        layout: &[(TransferSize::A4, 1), (TransferSize::S95x95, 6)],
        weight: 2.0,
    },
    Candidate {
        name: "2×A5 + 8×95x95",
        layout: &[(TransferSize::A5, 2), (TransferSize::S95x95, 8)],
        weight: 2.0,
    },
    Candidate {
        name: "1×295x100 + 1×A6 + 8×60x60",
        layout: &[
            (TransferSize::S295x100, 1),
            (TransferSize::A6, 1),
            (TransferSize::S60x60, 8),
        ],
        weight: 2.0,
    },
    Candidate {
        name: "2×A4 only",
        layout: &[(TransferSize::A4, 2)],
        weight: 1.0,
    },
    Candidate {
        name: "4×A5 only",
        layout: &[(TransferSize::A5, 4)],
        weight: 1.0,
    },
    Candidate {
        name: "Max 100x70 only",
        layout: &[(TransferSize::S100x70, 40)],
        weight: 1.0,
    },
];

/// Builds the validated catalog.
///
/// Runs the utilization calculator over every curated candidate, keeps
/// those with utilization in `(0, 1]`, and returns them sorted by
/// descending weight (stable, so the curated order breaks ties). This is
/// the trial order the combination selector uses.
pub fn build_catalog() -> Vec<LayoutTemplate> {
    let mut catalog: Vec<LayoutTemplate> = CANDIDATES
        .iter()
        .filter_map(|c| {
            let utilization = packing::utilization(c.layout);
            if utilization > 0.0 && utilization <= 1.0 {
                Some(LayoutTemplate {
                    name: c.name.to_string(),
                    layout: c.layout.to_vec(),
                    weight: c.weight,
                    utilization,
                })
            } else {
                None
            }
        })
        .collect();
    catalog.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    catalog
}
