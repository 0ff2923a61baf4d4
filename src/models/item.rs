//! Schedulable items: sessions and events.
//!
//! Both kinds share a schedulable capability (content, people, a scheduled
//! flag) but are placed differently: a session takes exactly one cell, an
//! event takes a run of consecutive cells in one room. [`Item`] is the
//! borrowed, kind-tagged view the condition engine and ordering rules work
//! on.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::timestamp::deserialize_blank_as_none;
use super::{Catalog, ContentItem, Identified, Timestamp};
use crate::error::{Result, TimetableError};

/// Kind of a schedulable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Placed into a single cell.
    Session,
    /// Placed across consecutive cells of one room.
    Event,
}

impl ItemKind {
    /// Lower-case label used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Session => "session",
            ItemKind::Event => "event",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A session: a block of content items sharing one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Session type.
    #[serde(default)]
    pub type_id: Option<String>,
    /// Assigned room.
    #[serde(default)]
    pub room_id: Option<String>,
    /// Assigned time slot.
    #[serde(default)]
    pub time_slot_id: Option<String>,
    /// Content items presented in the session.
    #[serde(default)]
    pub content_ids: Vec<String>,
    /// Chairpersons.
    #[serde(default)]
    pub chair_ids: Vec<String>,
    /// Whether the session holds an assignment.
    #[serde(default)]
    pub is_scheduled: bool,
}

/// An event: may span several consecutive time slots of one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier.
    pub id: String,
    /// Event type.
    #[serde(default)]
    pub type_id: Option<String>,
    /// Assigned room.
    #[serde(default)]
    pub room_id: Option<String>,
    /// Assigned start (start of the first spanned slot).
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub start_date: Option<Timestamp>,
    /// Assigned end (end of the last spanned slot).
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub end_date: Option<Timestamp>,
    /// Content items presented at the event.
    #[serde(default)]
    pub content_ids: Vec<String>,
    /// Chairpersons.
    #[serde(default)]
    pub chair_ids: Vec<String>,
    /// Presenters.
    #[serde(default)]
    pub presenter_ids: Vec<String>,
    /// Whether the event holds an assignment.
    #[serde(default)]
    pub is_scheduled: bool,
    /// Off-grid location descriptor.
    #[serde(default)]
    pub location: Option<serde_json::Value>,
    /// Coordinates of the location.
    #[serde(default)]
    pub coordinates: Option<serde_json::Value>,
    /// Hidden from the public programme.
    #[serde(default)]
    pub is_private: bool,
}

impl Session {
    /// Creates an unscheduled, untyped session.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: None,
            room_id: None,
            time_slot_id: None,
            content_ids: Vec::new(),
            chair_ids: Vec::new(),
            is_scheduled: false,
        }
    }

    /// Sets the session type.
    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Adds a content item.
    pub fn with_content(mut self, content_id: impl Into<String>) -> Self {
        self.content_ids.push(content_id.into());
        self
    }

    /// Adds a chairperson.
    pub fn with_chair(mut self, person_id: impl Into<String>) -> Self {
        self.chair_ids.push(person_id.into());
        self
    }

    /// Marks the session as already scheduled into a room and slot.
    pub fn scheduled_at(mut self, room_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self.time_slot_id = Some(slot_id.into());
        self.is_scheduled = true;
        self
    }

    /// Drops any assignment.
    pub fn unschedule(&mut self) {
        self.room_id = None;
        self.time_slot_id = None;
        self.is_scheduled = false;
    }
}

impl Event {
    /// Creates an unscheduled, untyped event.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: None,
            room_id: None,
            start_date: None,
            end_date: None,
            content_ids: Vec::new(),
            chair_ids: Vec::new(),
            presenter_ids: Vec::new(),
            is_scheduled: false,
            location: None,
            coordinates: None,
            is_private: false,
        }
    }

    /// Sets the event type.
    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Adds a content item.
    pub fn with_content(mut self, content_id: impl Into<String>) -> Self {
        self.content_ids.push(content_id.into());
        self
    }

    /// Adds a chairperson.
    pub fn with_chair(mut self, person_id: impl Into<String>) -> Self {
        self.chair_ids.push(person_id.into());
        self
    }

    /// Adds a presenter.
    pub fn with_presenter(mut self, person_id: impl Into<String>) -> Self {
        self.presenter_ids.push(person_id.into());
        self
    }

    /// Sets an off-grid location.
    pub fn with_location(
        mut self,
        location: serde_json::Value,
        coordinates: serde_json::Value,
    ) -> Self {
        self.location = Some(location);
        self.coordinates = Some(coordinates);
        self
    }

    /// Marks the event as already scheduled into a room over `[start, end]`.
    pub fn scheduled_at(
        mut self,
        room_id: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
    ) -> Self {
        self.room_id = Some(room_id.into());
        self.start_date = Some(start);
        self.end_date = Some(end);
        self.is_scheduled = true;
        self
    }

    /// Drops any assignment, including an off-grid location.
    pub fn unschedule(&mut self) {
        self.room_id = None;
        self.start_date = None;
        self.end_date = None;
        self.is_scheduled = false;
        if self.location.as_ref().is_some_and(is_truthy) {
            self.location = None;
            self.coordinates = None;
        }
    }
}

// An empty-string or `false` location does not count as set.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

impl Identified for Session {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Index of an item inside the context catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRef {
    /// Position in `ScheduleContext::sessions`.
    Session(usize),
    /// Position in `ScheduleContext::events`.
    Event(usize),
}

impl ItemRef {
    /// Kind of the referenced item.
    pub fn kind(self) -> ItemKind {
        match self {
            ItemRef::Session(_) => ItemKind::Session,
            ItemRef::Event(_) => ItemKind::Event,
        }
    }
}

/// Borrowed view of a session or an event.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    Session(&'a Session),
    Event(&'a Event),
}

impl<'a> Item<'a> {
    /// Item id.
    pub fn id(self) -> &'a str {
        match self {
            Item::Session(s) => &s.id,
            Item::Event(e) => &e.id,
        }
    }

    /// Item kind.
    pub fn kind(self) -> ItemKind {
        match self {
            Item::Session(_) => ItemKind::Session,
            Item::Event(_) => ItemKind::Event,
        }
    }

    /// Item type reference.
    pub fn type_id(self) -> Option<&'a str> {
        match self {
            Item::Session(s) => s.type_id.as_deref(),
            Item::Event(e) => e.type_id.as_deref(),
        }
    }

    /// Content items making up the item.
    pub fn content_ids(self) -> &'a [String] {
        match self {
            Item::Session(s) => &s.content_ids,
            Item::Event(e) => &e.content_ids,
        }
    }

    /// Chairpersons.
    pub fn chair_ids(self) -> &'a [String] {
        match self {
            Item::Session(s) => &s.chair_ids,
            Item::Event(e) => &e.chair_ids,
        }
    }

    /// Presenters (always empty for sessions).
    pub fn presenter_ids(self) -> &'a [String] {
        match self {
            Item::Session(_) => &[],
            Item::Event(e) => &e.presenter_ids,
        }
    }

    /// Whether the item holds an assignment.
    pub fn is_scheduled(self) -> bool {
        match self {
            Item::Session(s) => s.is_scheduled,
            Item::Event(e) => e.is_scheduled,
        }
    }

    /// Everyone who must be present: chairs, content authors, presenters.
    ///
    /// # Errors
    /// [`TimetableError::UnknownContent`] if a content id is not in `contents`.
    pub fn people<'b>(self, contents: &'b Catalog<ContentItem>) -> Result<Vec<&'b str>>
    where
        'a: 'b,
    {
        let mut people: Vec<&'b str> = self.chair_ids().iter().map(String::as_str).collect();
        for content_id in self.content_ids() {
            let content = contents
                .get(content_id)
                .ok_or_else(|| TimetableError::UnknownContent(content_id.clone()))?;
            people.extend(content.author_ids());
        }
        people.extend(self.presenter_ids().iter().map(String::as_str));
        Ok(people)
    }
}
