//! Sheet geometry: transfer size dimensions and fit counts.
//!
//! All dimensions are production crop sizes in millimeters with bleed
//! already included, so no gutter is needed for legality checks.
//! Items are always placed in their stored orientation — rotation is
//! never considered anywhere in the engine.

use crate::models::TransferSize;

/// Print sheet width (mm).
pub const SHEET_W_MM: f64 = 310.0;
/// Print sheet height (mm).
pub const SHEET_H_MM: f64 = 440.0;
/// Print sheet area (mm²).
pub const SHEET_AREA_MM2: f64 = SHEET_W_MM * SHEET_H_MM;

/// Returns the crop dimensions `(width, height)` in mm for a transfer size.
///
/// The values are exact production crop dimensions; several are fractional.
/// This is a pure lookup — calling it twice always yields the same result.
pub fn size_dims_mm(size: TransferSize) -> (f64, f64) {
    use TransferSize::*;
    match size {
        A3 => (297.0, 420.0),
        A4 => (309.0, 219.5),
        A5 => (154.5, 219.22),
        A6 => (154.5, 109.75),
        S295x100 => (309.0, 109.75),
        S95x95 => (103.0, 109.75),
        S100x70 => (77.25, 109.75),
        S60x60 => (77.25, 73.17),
        S290x140 => (309.0, 146.0),
    }
}

/// How many items of `size` fit on one sheet in a plain grid.
///
/// `floor(W/w) × floor(H/h)`, no rotation, no gutter. The sheet-native
/// size ([`TransferSize::A3`]) always consumes a whole sheet by itself and
/// is reported as capacity 0 — it can never be ganged.
pub fn sheet_capacity(size: TransferSize) -> u32 {
    if size == TransferSize::A3 {
        return 0;
    }
    let (w, h) = size_dims_mm(size);
    if w <= 0.0 || h <= 0.0 || w > SHEET_W_MM || h > SHEET_H_MM {
        return 0;
    }
    let across = (SHEET_W_MM / w).floor() as u32;
    let down = (SHEET_H_MM / h).floor() as u32;
    across * down
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_are_pure() {
        for size in TransferSize::ALL {
            assert_eq!(size_dims_mm(size), size_dims_mm(size));
            let (w, h) = size_dims_mm(size);
            assert!(w > 0.0 && h > 0.0);
        }
    }

    #[test]
    fn test_a6_capacity_is_eight() {
        // floor(310/154.5)=2 across, floor(440/109.75)=4 down
        assert_eq!(sheet_capacity(TransferSize::A6), 8);
    }

    #[test]
    fn test_native_size_cannot_be_ganged() {
        assert_eq!(sheet_capacity(TransferSize::A3), 0);
    }

    #[test]
    fn test_known_capacities() {
        assert_eq!(sheet_capacity(TransferSize::A4), 2); // 1×2
        assert_eq!(sheet_capacity(TransferSize::A5), 4); // 2×2
        assert_eq!(sheet_capacity(TransferSize::S100x70), 16); // 4×4
        assert_eq!(sheet_capacity(TransferSize::S295x100), 4); // 1×4
        assert_eq!(sheet_capacity(TransferSize::S60x60), 24); // 4×6
        assert_eq!(sheet_capacity(TransferSize::S290x140), 3); // 1×3
        assert_eq!(sheet_capacity(TransferSize::S95x95), 12); // 3×4
    }
}
