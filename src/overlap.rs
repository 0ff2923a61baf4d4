//! Time-slot overlap analysis.
//!
//! Slots that intersect any other slot are flagged and later kept out of
//! the grid by the `time_slot_not_overlapped` condition.

use tracing::debug;

use crate::models::{Catalog, TimeSlot};

/// Whether `b` intersects `a`.
///
/// True if `b` starts inside `[a.start, a.end)`, ends inside
/// `(a.start, a.end]`, or covers `a` entirely.
pub fn slots_overlap(a: &TimeSlot, b: &TimeSlot) -> bool {
    let (s1, e1) = (a.start_ms(), a.end_ms());
    let (s2, e2) = (b.start_ms(), b.end_ms());
    (s2 >= s1 && s2 < e1) || (e2 > s1 && e2 <= e1) || (s2 <= s1 && e2 >= e1)
}

/// Sets `is_overlapped` on every slot that does not carry the flag yet.
///
/// Each unflagged slot is compared against the others until the first
/// intersection; both participants are then flagged `true`. Slots with no
/// intersection are flagged `false`. Existing flags are never reset.
///
/// Returns the number of slots flagged as overlapped.
///
/// # Complexity
/// O(n²) in the number of slots.
pub fn mark_overlaps(slots: &mut Catalog<TimeSlot>) -> usize {
    for i in 0..slots.len() {
        if slots.at(i).is_overlapped.is_some() {
            continue;
        }
        let hit = (0..slots.len()).find(|&j| j != i && slots_overlap(slots.at(i), slots.at(j)));
        match hit {
            Some(j) => {
                debug!(slot = %slots.at(i).id, other = %slots.at(j).id, "time slots overlap");
                slots.at_mut(j).is_overlapped = Some(true);
                slots.at_mut(i).is_overlapped = Some(true);
            }
            None => slots.at_mut(i).is_overlapped = Some(false),
        }
    }
    slots.values().filter(|s| s.overlapped()).count()
}
