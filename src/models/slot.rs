//! Output slot model.
//!
//! An output slot is a named lay-down lane that finished jobs are moved
//! into. Slots follow the `LAY-<letter><generation>` naming convention and
//! are consumed in lane order: `LAY-A1` … `LAY-Z1`, then `LAY-A2` … `LAY-Z2`.

use serde::{Deserialize, Serialize};

/// A lay-down lane with its current occupancy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSlot {
    /// Lane code, e.g. `LAY-A1`.
    pub id: String,
    /// Number of jobs currently resting in this lane.
    pub occupancy: u32,
}

impl OutputSlot {
    /// Creates an empty slot.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            occupancy: 0,
        }
    }

    /// Sets the current occupancy.
    pub fn with_occupancy(mut self, occupancy: u32) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Lane ordering key: `(generation, letter)`, so all first-generation
    /// lanes come before any second-generation lane. Codes that don't
    /// parse sort last.
    pub fn lane_key(&self) -> (u32, u8) {
        parse_lane_code(&self.id).unwrap_or((u32::MAX, u8::MAX))
    }
}

fn parse_lane_code(id: &str) -> Option<(u32, u8)> {
    let suffix = id.split('-').nth(1)?;
    let mut chars = suffix.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }
    let number: u32 = chars.as_str().parse().ok()?;
    Some((number, letter.to_ascii_uppercase() as u8))
}

/// Builds the ordered slot queue for a run.
///
/// Drops lanes at or above the overload threshold, then sorts the rest in
/// lane order. The returned order is the order slots are consumed in.
pub fn build_slot_queue(slots: &[OutputSlot], overload_threshold: u32) -> Vec<OutputSlot> {
    let mut queue: Vec<OutputSlot> = slots
        .iter()
        .filter(|s| s.occupancy < overload_threshold)
        .cloned()
        .collect();
    queue.sort_by_key(|s| s.lane_key());
    queue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_ordering_generation_first() {
        let slots = vec![
            OutputSlot::new("LAY-A2"),
            OutputSlot::new("LAY-C1"),
            OutputSlot::new("LAY-B1"),
            OutputSlot::new("LAY-A1"),
        ];
        let queue = build_slot_queue(&slots, 20);
        let ids: Vec<&str> = queue.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["LAY-A1", "LAY-B1", "LAY-C1", "LAY-A2"]);
    }

    #[test]
    fn test_overloaded_lanes_dropped() {
        let slots = vec![
            OutputSlot::new("LAY-A1").with_occupancy(20),
            OutputSlot::new("LAY-B1").with_occupancy(3),
        ];
        let queue = build_slot_queue(&slots, 20);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, "LAY-B1");
    }

    #[test]
    fn test_unparseable_codes_sort_last() {
        let slots = vec![OutputSlot::new("misc"), OutputSlot::new("LAY-A1")];
        let queue = build_slot_queue(&slots, 20);
        assert_eq!(queue[0].id, "LAY-A1");
        assert_eq!(queue[1].id, "misc");
    }

    #[test]
    fn test_lane_key_case_insensitive() {
        assert_eq!(
            OutputSlot::new("LAY-a1").lane_key(),
            OutputSlot::new("LAY-A1").lane_key()
        );
    }
}
