//! The input document.
//!
//! A [`ScheduleContext`] owns every entity of one scheduling run. The grid
//! refers back into it by catalog position; the autoscheduler mutates the
//! session and event assignments in place.

use serde::{Deserialize, Serialize};

use super::{
    Catalog, ContentItem, Event, Item, ItemRef, ItemType, Room, ScheduleResult, Session, TimeSlot,
};

/// Rooms, time slots, types, content and the items to schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleContext {
    /// Rooms (grid columns).
    #[serde(default)]
    pub rooms: Catalog<Room>,
    /// Time slots (grid rows).
    #[serde(default)]
    pub time_slots: Catalog<TimeSlot>,
    /// Item types.
    #[serde(default)]
    pub types: Catalog<ItemType>,
    /// Sessions.
    #[serde(default)]
    pub sessions: Catalog<Session>,
    /// Events.
    #[serde(default)]
    pub events: Catalog<Event>,
    /// Content items.
    #[serde(default)]
    pub contents: Catalog<ContentItem>,
}

impl ScheduleContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a time slot.
    pub fn with_time_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Adds an item type.
    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.types.push(item_type);
        self
    }

    /// Adds a session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.sessions.push(session);
        self
    }

    /// Adds an event.
    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    /// Adds a content item.
    pub fn with_content(mut self, content: ContentItem) -> Self {
        self.contents.push(content);
        self
    }

    /// Borrowed view of an item.
    ///
    /// # Panics
    /// If the reference is out of bounds.
    pub fn item(&self, item: ItemRef) -> Item<'_> {
        match item {
            ItemRef::Session(pos) => Item::Session(self.sessions.at(pos)),
            ItemRef::Event(pos) => Item::Event(self.events.at(pos)),
        }
    }

    /// All items in collection order: sessions first, then events.
    pub fn item_refs(&self) -> impl Iterator<Item = ItemRef> {
        (0..self.sessions.len())
            .map(ItemRef::Session)
            .chain((0..self.events.len()).map(ItemRef::Event))
    }

    /// Items without an assignment, in collection order.
    pub fn unscheduled_refs(&self) -> Vec<ItemRef> {
        self.item_refs()
            .filter(|&r| !self.item(r).is_scheduled())
            .collect()
    }

    /// Clears every session and event assignment.
    pub fn unschedule_all(&mut self) {
        for session in self.sessions.values_mut() {
            session.unschedule();
        }
        for event in self.events.values_mut() {
            event.unschedule();
        }
    }

    /// Output projection of the current assignments.
    pub fn result(&self) -> ScheduleResult {
        ScheduleResult::from_context(self)
    }
}
