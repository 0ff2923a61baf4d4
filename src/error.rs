//! Error types for the timetable engine.

use thiserror::Error;

/// Errors raised while loading, configuring or scheduling a timetable.
///
/// Failing to place an item is not an error; it only leaves the item
/// unscheduled. These variants cover broken references and I/O.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// A content id referenced by a session or event does not exist.
    #[error("unknown content item: {0}")]
    UnknownContent(String),

    /// A type id referenced by a room, item or content item does not exist.
    #[error("unknown item type: {0}")]
    UnknownType(String),

    /// A room id referenced by a scheduled item does not exist.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// A time slot id referenced by a scheduled item does not exist.
    #[error("unknown time slot: {0}")]
    UnknownTimeSlot(String),

    /// A scheduled item lacks the fields needed to locate its cells.
    #[error("incomplete assignment for {kind} {id}: {reason}")]
    IncompleteAssignment {
        kind: &'static str,
        id: String,
        reason: &'static str,
    },

    /// A date string could not be parsed.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// A policy configuration names a condition that does not exist.
    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// JSON (de)serialisation error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TimetableError::UnknownContent("C9".into()).to_string(),
            "unknown content item: C9"
        );
        let err = TimetableError::IncompleteAssignment {
            kind: "event",
            id: "E1".into(),
            reason: "missing start date",
        };
        assert_eq!(
            err.to_string(),
            "incomplete assignment for event E1: missing start date"
        );
    }
}
