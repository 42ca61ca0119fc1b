//! Shelf-packing utilization calculator.
//!
//! Estimates how much sheet area a multiset of transfer items consumes,
//! and whether they physically fit at all. The heuristic lays items in
//! horizontal shelves, tallest items first, filling each shelf
//! left-to-right before opening a new one below. No rotation.
//!
//! Two named behaviors share the algorithm:
//! - [`utilization`]: gutter 0, used for live legality and quantity checks
//!   (bleed is already baked into the crop dimensions).
//! - [`display_utilization`]: 2 mm separation, the conservative variant
//!   used for some report-time estimates.

use crate::geometry::{size_dims_mm, SHEET_AREA_MM2, SHEET_H_MM, SHEET_W_MM};
use crate::models::TransferSize;

/// Gutter used by the display-estimate variant (mm).
const DISPLAY_GUTTER_MM: f64 = 2.0;

/// Sheet utilization of a layout with no gutter.
///
/// Returns the fraction of sheet area covered, in `(0, 1]` for feasible
/// layouts, or `0.0` when the layout cannot be physically placed.
/// Infeasibility is a normal outcome, never an error.
pub fn utilization(layout: &[(TransferSize, u32)]) -> f64 {
    shelf_pack(layout, 0.0, 0.0)
}

/// Sheet utilization with a 2 mm separation between items and shelves.
///
/// Strictly more conservative than [`utilization`]; a layout feasible here
/// is always feasible without the gutter.
pub fn display_utilization(layout: &[(TransferSize, u32)]) -> f64 {
    shelf_pack(layout, DISPLAY_GUTTER_MM, DISPLAY_GUTTER_MM)
}

/// Deterministic shelf packing.
///
/// 1. Expand the layout into `(w, h)` instances; reject non-positive dims.
/// 2. Stable-sort by height descending (ties keep enumeration order).
/// 3. Place each item on the first existing shelf with room, else open a
///    new shelf below if the sheet height allows.
/// 4. Any unplaceable item makes the whole layout infeasible (`0.0`) —
///    this is an all-or-nothing check, not partial packing.
fn shelf_pack(layout: &[(TransferSize, u32)], gutter_x: f64, gutter_y: f64) -> f64 {
    let mut items: Vec<(f64, f64)> = Vec::new();
    for &(size, count) in layout {
        let (w, h) = size_dims_mm(size);
        if w <= 0.0 || h <= 0.0 {
            return 0.0;
        }
        for _ in 0..count {
            items.push((w, h));
        }
    }

    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    // (used_width, shelf_height), in creation order
    let mut shelves: Vec<(f64, f64)> = Vec::new();
    let mut total_used_area = 0.0;

    for (item_w, item_h) in items {
        let mut placed = false;

        for shelf in shelves.iter_mut() {
            if shelf.0 + gutter_x + item_w <= SHEET_W_MM && item_h <= shelf.1 {
                shelf.0 += gutter_x + item_w;
                total_used_area += item_w * item_h;
                placed = true;
                break;
            }
        }

        if !placed {
            let next_shelf_y: f64 = shelves.iter().map(|s| s.1 + gutter_y).sum();
            if next_shelf_y + item_h <= SHEET_H_MM && item_w <= SHEET_W_MM {
                shelves.push((item_w, item_h));
                total_used_area += item_w * item_h;
                placed = true;
            }
        }

        if !placed {
            return 0.0;
        }
    }

    let utilization = total_used_area / SHEET_AREA_MM2;
    if utilization <= 1.0 {
        utilization
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransferSize::*;

    #[test]
    fn test_empty_layout() {
        assert_eq!(utilization(&[]), 0.0);
    }

    #[test]
    fn test_single_item_bounds() {
        let u = utilization(&[(A4, 1)]);
        assert!(u > 0.0 && u <= 1.0);
        let expected = (309.0 * 219.5) / SHEET_AREA_MM2;
        assert!((u - expected).abs() < 1e-9);
    }

    #[test]
    fn test_two_a4_stack() {
        // Two A4 stack as two shelves: 219.5 + 219.5 = 439 ≤ 440.
        let u = utilization(&[(A4, 2)]);
        assert!(u > 0.99 && u <= 1.0);
    }

    #[test]
    fn test_overfull_layout_is_infeasible() {
        // 40 × 100x70 exceeds the 16-item grid capacity.
        assert_eq!(utilization(&[(S100x70, 40)]), 0.0);
    }

    #[test]
    fn test_mixed_layout_feasible() {
        // 2×A5 + 2×A6 + 4×100x70 packs into three shelves.
        let u = utilization(&[(A5, 2), (A6, 2), (S100x70, 4)]);
        assert!(u > 0.99 && u <= 1.0);
    }

    #[test]
    fn test_mixed_layout_infeasible() {
        // A4 + A5 shelves leave no height for a fourth 100x70 shelf.
        assert_eq!(utilization(&[(A4, 1), (A5, 1), (S100x70, 4)]), 0.0);
    }

    #[test]
    fn test_display_variant_is_more_conservative() {
        // Two A4 fit exactly without gutters but not with 2 mm separation.
        assert!(utilization(&[(A4, 2)]) > 0.0);
        assert_eq!(display_utilization(&[(A4, 2)]), 0.0);

        // Where both are feasible, covered area is identical.
        let live = utilization(&[(A6, 2)]);
        let display = display_utilization(&[(A6, 2)]);
        assert!(live > 0.0 && display > 0.0);
        assert!((live - display).abs() < 1e-9);
    }

    #[test]
    fn test_full_grid_utilization() {
        // 8 × A6 is the exact 2×4 grid.
        let u = utilization(&[(A6, 8)]);
        let expected = 8.0 * 154.5 * 109.75 / SHEET_AREA_MM2;
        assert!((u - expected).abs() < 1e-9);
    }
}
