//! Room model.
//!
//! Rooms form the columns of the schedule grid. Each room may reference an
//! item type; the room-type condition only lets items of that type in.

use serde::{Deserialize, Serialize};

use super::Identified;

/// A room that can host sessions and events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Item type the room is set up for.
    #[serde(default)]
    pub type_id: Option<String>,
    /// Physical setup descriptor (theatre, classroom, ...).
    #[serde(default)]
    pub setup: Option<serde_json::Value>,
    /// Seating capacity.
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl Room {
    /// Creates a room with no type.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_id: None,
            setup: None,
            capacity: None,
        }
    }

    /// Sets the room's item type.
    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Sets the setup descriptor.
    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(serde_json::Value::String(setup.into()));
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

impl Identified for Room {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let room = Room::new("R1")
            .with_type("T1")
            .with_setup("theatre")
            .with_capacity(120);
        assert_eq!(room.id, "R1");
        assert_eq!(room.type_id.as_deref(), Some("T1"));
        assert_eq!(room.capacity, Some(120));
    }

    #[test]
    fn test_room_from_json() {
        let room: Room =
            serde_json::from_str(r#"{"id": "R1", "typeId": "T2", "capacity": 40}"#).unwrap();
        assert_eq!(room.type_id.as_deref(), Some("T2"));
        assert!(room.setup.is_none());
    }
}
