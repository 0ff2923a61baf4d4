//! Duration utilities.
//!
//! All durations are in milliseconds. An item's required duration is the
//! sum of its content items' type durations.

use crate::error::{Result, TimetableError};
use crate::models::{Catalog, ContentItem, Item, ItemType, TimeSlot};

/// Duration of a single slot (ms).
#[inline]
pub fn time_slot_duration_ms(slot: &TimeSlot) -> i64 {
    slot.end_ms() - slot.start_ms()
}

/// Span from the start of `first` to the end of `last` (ms).
///
/// Gaps between the two slots count towards the span.
#[inline]
pub fn span_duration_ms(first: &TimeSlot, last: &TimeSlot) -> i64 {
    last.end_ms() - first.start_ms()
}

/// Required duration of an item (ms).
///
/// Content items without a type contribute nothing.
///
/// # Errors
/// Unknown content ids and unknown content type ids.
pub fn item_duration_ms(
    item: Item<'_>,
    contents: &Catalog<ContentItem>,
    types: &Catalog<ItemType>,
) -> Result<i64> {
    let mut total = 0;
    for content_id in item.content_ids() {
        let content = contents
            .get(content_id)
            .ok_or_else(|| TimetableError::UnknownContent(content_id.clone()))?;
        if let Some(type_id) = &content.type_id {
            let item_type = types
                .get(type_id)
                .ok_or_else(|| TimetableError::UnknownType(type_id.clone()))?;
            total += item_type.duration_ms();
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, Timestamp};

    fn slot(id: &str, start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            id,
            Timestamp::parse(start).unwrap(),
            Timestamp::parse(end).unwrap(),
        )
    }

    #[test]
    fn test_slot_and_span_duration() {
        let a = slot("A", "2024-06-03T09:00:00Z", "2024-06-03T10:00:00Z");
        let b = slot("B", "2024-06-03T10:30:00Z", "2024-06-03T11:00:00Z");
        assert_eq!(time_slot_duration_ms(&a), 3_600_000);
        // 09:00 → 11:00 including the half-hour gap
        assert_eq!(span_duration_ms(&a, &b), 7_200_000);
    }

    #[test]
    fn test_item_duration_sums_content_types() {
        let types = Catalog::new()
            .with(ItemType::new("paper", "Paper", 20))
            .with(ItemType::new("demo", "Demo", 10));
        let contents = Catalog::new()
            .with(ContentItem::new("C1").with_type("paper"))
            .with(ContentItem::new("C2").with_type("demo"))
            .with(ContentItem::new("C3"));
        let session = Session::new("S1")
            .with_content("C1")
            .with_content("C2")
            .with_content("C3");

        let ms = item_duration_ms(Item::Session(&session), &contents, &types).unwrap();
        assert_eq!(ms, 30 * 60_000);
    }

    #[test]
    fn test_item_duration_unknown_references() {
        let types = Catalog::new();
        let contents = Catalog::new().with(ContentItem::new("C1").with_type("ghost"));

        let s1 = Session::new("S1").with_content("C1");
        let err = item_duration_ms(Item::Session(&s1), &contents, &types).unwrap_err();
        assert!(matches!(err, TimetableError::UnknownType(id) if id == "ghost"));

        let s2 = Session::new("S2").with_content("C9");
        let err = item_duration_ms(Item::Session(&s2), &contents, &types).unwrap_err();
        assert!(matches!(err, TimetableError::UnknownContent(id) if id == "C9"));
    }

    #[test]
    fn test_empty_item_has_zero_duration() {
        let session = Session::new("S1");
        let ms =
            item_duration_ms(Item::Session(&session), &Catalog::new(), &Catalog::new()).unwrap();
        assert_eq!(ms, 0);
    }
}
