//! Time slot model.
//!
//! Time slots form the rows of the schedule grid. A slot's `slot_type` is
//! either the generic session tag or the name of the item type it is
//! reserved for.

use serde::{Deserialize, Serialize};

use super::{Identified, Timestamp};

/// A bookable interval of the conference programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Slot start.
    pub start_date: Timestamp,
    /// Slot end.
    pub end_date: Timestamp,
    /// Semantic tag (`SESSION` or a type name).
    #[serde(rename = "type", default)]
    pub slot_type: String,
    /// Whether another slot intersects this one. Set once per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_overlapped: Option<bool>,
}

impl TimeSlot {
    /// Creates a generic session slot.
    pub fn new(id: impl Into<String>, start_date: Timestamp, end_date: Timestamp) -> Self {
        Self {
            id: id.into(),
            start_date,
            end_date,
            slot_type: "SESSION".to_string(),
            is_overlapped: None,
        }
    }

    /// Sets the slot type tag.
    pub fn with_type(mut self, slot_type: impl Into<String>) -> Self {
        self.slot_type = slot_type.into();
        self
    }

    /// Slot start (ms).
    #[inline]
    pub fn start_ms(&self) -> i64 {
        self.start_date.millis()
    }

    /// Slot end (ms).
    #[inline]
    pub fn end_ms(&self) -> i64 {
        self.end_date.millis()
    }

    /// Whether the slot has been flagged as overlapping another one.
    pub fn overlapped(&self) -> bool {
        self.is_overlapped.unwrap_or(false)
    }
}

impl Identified for TimeSlot {
    fn id(&self) -> &str {
        &self.id
    }
}
