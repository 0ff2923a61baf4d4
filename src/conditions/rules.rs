//! Built-in conditions.
//!
//! # Categories
//!
//! - **Occupancy**: `item_not_scheduled`, `cell_empty`
//! - **Fit**: `duration_fits`, `time_slot_not_overlapped`
//! - **Type**: `content_type_compatible`, `time_slot_type_compatible`,
//!   `room_type_compatible`
//! - **People**: `people_compatible`
//!
//! Type names are compared case-insensitively; type ids exactly.

use std::collections::HashSet;
use std::sync::Arc;

use super::Condition;
use crate::duration::item_duration_ms;
use crate::error::{Result, TimetableError};
use crate::models::{Cell, Item, ItemType, ScheduleContext, ScheduleGrid};

/// Names of every built-in condition.
pub const BUILTIN_NAMES: [&str; 8] = [
    "item_not_scheduled",
    "cell_empty",
    "duration_fits",
    "content_type_compatible",
    "time_slot_not_overlapped",
    "people_compatible",
    "time_slot_type_compatible",
    "room_type_compatible",
];

/// Instantiates a built-in condition by name.
///
/// `generic_slot_type` and `excluded_session_types` parameterize the two
/// type-name rules.
pub fn builtin(
    name: &str,
    generic_slot_type: &str,
    excluded_session_types: &[String],
) -> Option<Arc<dyn Condition>> {
    let condition: Arc<dyn Condition> = match name {
        "item_not_scheduled" => Arc::new(ItemNotScheduled),
        "cell_empty" => Arc::new(CellEmpty),
        "duration_fits" => Arc::new(DurationFits),
        "content_type_compatible" => Arc::new(ContentTypeCompatible::new(excluded_session_types)),
        "time_slot_not_overlapped" => Arc::new(TimeSlotNotOverlapped),
        "people_compatible" => Arc::new(PeopleCompatible),
        "time_slot_type_compatible" => Arc::new(TimeSlotTypeCompatible::new(generic_slot_type)),
        "room_type_compatible" => Arc::new(RoomTypeCompatible),
        _ => return None,
    };
    Some(condition)
}

fn item_type<'c>(ctx: &'c ScheduleContext, type_id: &str) -> Result<&'c ItemType> {
    ctx.types
        .get(type_id)
        .ok_or_else(|| TimetableError::UnknownType(type_id.to_string()))
}

/// The item holds no assignment yet.
#[derive(Debug, Clone, Copy)]
pub struct ItemNotScheduled;

impl Condition for ItemNotScheduled {
    fn name(&self) -> &'static str {
        "item_not_scheduled"
    }

    fn check(
        &self,
        _: &Cell,
        item: Item<'_>,
        _: &ScheduleContext,
        _: &ScheduleGrid,
    ) -> Result<bool> {
        Ok(!item.is_scheduled())
    }
}

/// No session and no event occupies the cell.
#[derive(Debug, Clone, Copy)]
pub struct CellEmpty;

impl Condition for CellEmpty {
    fn name(&self) -> &'static str {
        "cell_empty"
    }

    fn check(
        &self,
        cell: &Cell,
        _: Item<'_>,
        _: &ScheduleContext,
        _: &ScheduleGrid,
    ) -> Result<bool> {
        Ok(cell.is_empty())
    }
}

/// The slot is at least as long as the item's required duration.
#[derive(Debug, Clone, Copy)]
pub struct DurationFits;

impl Condition for DurationFits {
    fn name(&self) -> &'static str {
        "duration_fits"
    }

    fn check(
        &self,
        cell: &Cell,
        item: Item<'_>,
        ctx: &ScheduleContext,
        _: &ScheduleGrid,
    ) -> Result<bool> {
        Ok(cell.duration_ms >= item_duration_ms(item, &ctx.contents, &ctx.types)?)
    }
}

/// The item has a type, and that type's name is not on the excluded list.
#[derive(Debug, Clone)]
pub struct ContentTypeCompatible {
    excluded: Vec<String>,
}

impl ContentTypeCompatible {
    /// Excludes the given type names (case-insensitive).
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: excluded
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl Condition for ContentTypeCompatible {
    fn name(&self) -> &'static str {
        "content_type_compatible"
    }

    fn check(
        &self,
        _: &Cell,
        item: Item<'_>,
        ctx: &ScheduleContext,
        _: &ScheduleGrid,
    ) -> Result<bool> {
        let Some(type_id) = item.type_id() else {
            return Ok(false);
        };
        let name = item_type(ctx, type_id)?.name.to_lowercase();
        Ok(!self.excluded.contains(&name))
    }
}

/// The cell's slot does not intersect any other slot.
#[derive(Debug, Clone, Copy)]
pub struct TimeSlotNotOverlapped;

impl Condition for TimeSlotNotOverlapped {
    fn name(&self) -> &'static str {
        "time_slot_not_overlapped"
    }

    fn check(
        &self,
        cell: &Cell,
        _: Item<'_>,
        ctx: &ScheduleContext,
        _: &ScheduleGrid,
    ) -> Result<bool> {
        Ok(!ctx.time_slots.at(cell.time_slot).overlapped())
    }
}

/// Nobody involved in the item is busy elsewhere in the same slot.
///
/// Compares the item's chairs, authors and presenters against those of
/// every item occupying any cell of the slot's row, as the grid stands now.
#[derive(Debug, Clone, Copy)]
pub struct PeopleCompatible;

impl Condition for PeopleCompatible {
    fn name(&self) -> &'static str {
        "people_compatible"
    }

    fn check(
        &self,
        cell: &Cell,
        item: Item<'_>,
        ctx: &ScheduleContext,
        grid: &ScheduleGrid,
    ) -> Result<bool> {
        let people: HashSet<&str> = item.people(&ctx.contents)?.into_iter().collect();
        if people.is_empty() {
            return Ok(true);
        }
        for &neighbour in grid.row(cell.time_slot) {
            for occupant in grid.cell(neighbour).occupants() {
                let busy = ctx.item(occupant).people(&ctx.contents)?;
                if busy.iter().any(|p| people.contains(p)) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

/// The slot is generic, or reserved for the item's own type name.
#[derive(Debug, Clone)]
pub struct TimeSlotTypeCompatible {
    generic_slot_type: String,
}

impl TimeSlotTypeCompatible {
    /// Treats `generic_slot_type` (exact match) as open to every type.
    pub fn new(generic_slot_type: impl Into<String>) -> Self {
        Self {
            generic_slot_type: generic_slot_type.into(),
        }
    }
}

impl Condition for TimeSlotTypeCompatible {
    fn name(&self) -> &'static str {
        "time_slot_type_compatible"
    }

    fn check(
        &self,
        cell: &Cell,
        item: Item<'_>,
        ctx: &ScheduleContext,
        _: &ScheduleGrid,
    ) -> Result<bool> {
        let slot_type = &ctx.time_slots.at(cell.time_slot).slot_type;
        if *slot_type == self.generic_slot_type {
            return Ok(true);
        }
        match item.type_id() {
            Some(type_id) => {
                let name = &item_type(ctx, type_id)?.name;
                Ok(name.to_lowercase() == slot_type.to_lowercase())
            }
            None => Ok(false),
        }
    }
}

/// The room is set up for exactly the item's type.
#[derive(Debug, Clone, Copy)]
pub struct RoomTypeCompatible;

impl Condition for RoomTypeCompatible {
    fn name(&self) -> &'static str {
        "room_type_compatible"
    }

    fn check(
        &self,
        cell: &Cell,
        item: Item<'_>,
        _: &ScheduleContext,
        _: &ScheduleGrid,
    ) -> Result<bool> {
        Ok(matches!(
            (cell.room_type_id.as_deref(), item.type_id()),
            (Some(room_type), Some(item_type)) if room_type == item_type
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{conference, room, slot};
    use crate::models::{Event, ItemRef, Room, Session};

    fn check<C: Condition>(
        condition: &C,
        ctx: &ScheduleContext,
        grid: &ScheduleGrid,
        cell: usize,
        item: ItemRef,
    ) -> bool {
        condition.check(grid.cell(cell), ctx.item(item), ctx, grid).unwrap()
    }

    fn one_room() -> ScheduleContext {
        conference()
            .with_room(room("R1", "paper"))
            .with_time_slot(slot("T1", 0, 9 * 60, 10 * 60))
    }

    #[test]
    fn test_builtin_lookup() {
        for name in BUILTIN_NAMES {
            let condition = builtin(name, "SESSION", &[]).unwrap();
            assert_eq!(condition.name(), name);
        }
        assert!(builtin("no_such_rule", "SESSION", &[]).is_none());
    }

    #[test]
    fn test_item_not_scheduled() {
        let ctx = one_room()
            .with_session(Session::new("S1"))
            .with_session(Session::new("S2").scheduled_at("R1", "T1"));
        let grid = ScheduleGrid::build(&ctx).unwrap();
        assert!(check(&ItemNotScheduled, &ctx, &grid, 0, ItemRef::Session(0)));
        assert!(!check(&ItemNotScheduled, &ctx, &grid, 0, ItemRef::Session(1)));
    }

    #[test]
    fn test_cell_empty() {
        let mut ctx = one_room()
            .with_session(Session::new("S1"))
            .with_event(Event::new("E1"));
        let mut grid = ScheduleGrid::build(&ctx).unwrap();
        assert!(check(&CellEmpty, &ctx, &grid, 0, ItemRef::Event(0)));
        grid.place_session(&mut ctx, 0, 0);
        assert!(!check(&CellEmpty, &ctx, &grid, 0, ItemRef::Event(0)));
    }

    #[test]
    fn test_duration_fits() {
        let ctx = one_room()
            .with_session(Session::new("two").with_content("P1").with_content("P2"))
            .with_session(
                Session::new("three")
                    .with_content("P1")
                    .with_content("P2")
                    .with_content("P3"),
            );
        let grid = ScheduleGrid::build(&ctx).unwrap();
        // 60-minute slot: 2 × 30 fits exactly, 3 × 30 does not
        assert!(check(&DurationFits, &ctx, &grid, 0, ItemRef::Session(0)));
        assert!(!check(&DurationFits, &ctx, &grid, 0, ItemRef::Session(1)));
    }

    #[test]
    fn test_content_type_compatible() {
        let rule = ContentTypeCompatible::new(["Plenary", "event"]);
        let ctx = one_room()
            .with_session(Session::new("typed").with_type("paper"))
            .with_session(Session::new("untyped"))
            .with_session(Session::new("plenary").with_type("plenary"))
            .with_session(Session::new("ghost").with_type("nope"));
        let grid = ScheduleGrid::build(&ctx).unwrap();

        assert!(check(&rule, &ctx, &grid, 0, ItemRef::Session(0)));
        assert!(!check(&rule, &ctx, &grid, 0, ItemRef::Session(1)));
        assert!(!check(&rule, &ctx, &grid, 0, ItemRef::Session(2)));
        let err = rule
            .check(grid.cell(0), ctx.item(ItemRef::Session(3)), &ctx, &grid)
            .unwrap_err();
        assert!(matches!(err, TimetableError::UnknownType(_)));
    }

    #[test]
    fn test_time_slot_not_overlapped() {
        let mut ctx = one_room().with_session(Session::new("S1"));
        let grid = ScheduleGrid::build(&ctx).unwrap();
        assert!(check(&TimeSlotNotOverlapped, &ctx, &grid, 0, ItemRef::Session(0)));
        ctx.time_slots.at_mut(0).is_overlapped = Some(true);
        assert!(!check(&TimeSlotNotOverlapped, &ctx, &grid, 0, ItemRef::Session(0)));
    }

    #[test]
    fn test_people_compatible_sees_whole_row() {
        let mut ctx = conference()
            .with_room(room("R1", "paper"))
            .with_room(room("R2", "paper"))
            .with_time_slot(slot("T1", 0, 9 * 60, 10 * 60))
            .with_time_slot(slot("T2", 0, 10 * 60, 11 * 60))
            .with_session(Session::new("S1").with_chair("zoe").with_content("P1"))
            .with_session(Session::new("S2").with_content("P2"))
            .with_session(Session::new("S3").with_chair("alice"))
            .with_event(Event::new("E1").with_presenter("zoe"));
        let mut grid = ScheduleGrid::build(&ctx).unwrap();
        let r1t1 = grid.cell_at("R1", "T1").unwrap();
        let r2t1 = grid.cell_at("R2", "T1").unwrap();
        let r2t2 = grid.cell_at("R2", "T2").unwrap();
        grid.place_session(&mut ctx, r1t1, 0);

        // S2 shares nobody with S1
        assert!(check(&PeopleCompatible, &ctx, &grid, r2t1, ItemRef::Session(1)));
        // S3's chair authored S1's paper
        assert!(!check(&PeopleCompatible, &ctx, &grid, r2t1, ItemRef::Session(2)));
        // E1's presenter chairs S1
        assert!(!check(&PeopleCompatible, &ctx, &grid, r2t1, ItemRef::Event(0)));
        // a different row is free
        assert!(check(&PeopleCompatible, &ctx, &grid, r2t2, ItemRef::Event(0)));
    }

    #[test]
    fn test_time_slot_type_compatible() {
        let rule = TimeSlotTypeCompatible::new("SESSION");
        let ctx = conference()
            .with_room(Room::new("R1"))
            .with_time_slot(slot("generic", 0, 9 * 60, 10 * 60))
            .with_time_slot(slot("ws", 0, 10 * 60, 11 * 60).with_type("WORKSHOP"))
            .with_time_slot(slot("lower", 0, 11 * 60, 12 * 60).with_type("session"))
            .with_session(Session::new("W").with_type("workshop"))
            .with_session(Session::new("P").with_type("paper"))
            .with_session(Session::new("U"));
        let grid = ScheduleGrid::build(&ctx).unwrap();

        assert!(check(&rule, &ctx, &grid, 0, ItemRef::Session(1)));
        assert!(check(&rule, &ctx, &grid, 0, ItemRef::Session(2)));
        assert!(check(&rule, &ctx, &grid, 1, ItemRef::Session(0)));
        assert!(!check(&rule, &ctx, &grid, 1, ItemRef::Session(1)));
        assert!(!check(&rule, &ctx, &grid, 1, ItemRef::Session(2)));
        // the generic tag is matched exactly
        assert!(!check(&rule, &ctx, &grid, 2, ItemRef::Session(1)));
    }

    #[test]
    fn test_room_type_compatible() {
        let ctx = conference()
            .with_room(room("R1", "paper"))
            .with_room(Room::new("R2"))
            .with_time_slot(slot("T1", 0, 9 * 60, 10 * 60))
            .with_session(Session::new("P").with_type("paper"))
            .with_session(Session::new("W").with_type("workshop"))
            .with_event(Event::new("E"));
        let grid = ScheduleGrid::build(&ctx).unwrap();
        let r1 = grid.cell_at("R1", "T1").unwrap();
        let r2 = grid.cell_at("R2", "T1").unwrap();

        assert!(check(&RoomTypeCompatible, &ctx, &grid, r1, ItemRef::Session(0)));
        assert!(!check(&RoomTypeCompatible, &ctx, &grid, r1, ItemRef::Session(1)));
        assert!(!check(&RoomTypeCompatible, &ctx, &grid, r2, ItemRef::Event(0)));
    }
}
