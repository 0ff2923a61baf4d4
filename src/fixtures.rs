//! Shared builders for unit tests.

use crate::models::{
    ContentItem, ItemType, Room, ScheduleContext, TimeSlot, Timestamp,
};

/// 2024-06-03T00:00:00Z
pub(crate) const DAY_ZERO_MS: i64 = 1_717_372_800_000;

/// Instant on conference day `day`, `minutes` after UTC midnight.
pub(crate) fn at(day: i64, minutes: i64) -> Timestamp {
    Timestamp::from_millis(DAY_ZERO_MS + day * 86_400_000 + minutes * 60_000).unwrap()
}

/// Generic session slot on `day` from `start` to `end` minutes after midnight.
pub(crate) fn slot(id: &str, day: i64, start: i64, end: i64) -> TimeSlot {
    TimeSlot::new(id, at(day, start), at(day, end))
}

/// Types, rooms and content used across scheduler tests.
///
/// - `paper` (30 min), `workshop` (60 min), `course` (60 min),
///   `plenary` (60 min), `reception` (60 min)
/// - content `P1`..`P4` are papers, `W1` a workshop, `K1` a course,
///   `X1` a reception
pub(crate) fn conference() -> ScheduleContext {
    ScheduleContext::new()
        .with_type(ItemType::new("paper", "Paper", 30))
        .with_type(ItemType::new("workshop", "Workshop", 60))
        .with_type(ItemType::new("course", "Course", 60))
        .with_type(ItemType::new("plenary", "Plenary", 60))
        .with_type(ItemType::new("reception", "Reception", 60))
        .with_content(ContentItem::new("P1").with_type("paper").with_author("alice"))
        .with_content(ContentItem::new("P2").with_type("paper").with_author("bob"))
        .with_content(ContentItem::new("P3").with_type("paper").with_author("carol"))
        .with_content(ContentItem::new("P4").with_type("paper").with_author("dave"))
        .with_content(ContentItem::new("W1").with_type("workshop").with_author("erin"))
        .with_content(ContentItem::new("K1").with_type("course").with_author("frank"))
        .with_content(ContentItem::new("X1").with_type("reception"))
}

/// A room set up for `type_id`.
pub(crate) fn room(id: &str, type_id: &str) -> Room {
    Room::new(id).with_type(type_id)
}
