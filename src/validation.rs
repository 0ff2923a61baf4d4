//! Input validation for timetable documents.
//!
//! Checks the reference integrity of a [`ScheduleContext`] before
//! scheduling. Detects:
//! - Catalog keys that differ from the entity's own id
//! - Two entities of one catalog sharing an id
//! - Unknown type, content, room and time-slot references
//! - Scheduled items missing the fields that locate their cells
//! - Time slots ending before they start
//!
//! The scheduler itself fails fast on the first broken reference; this
//! pass collects all of them.

use std::collections::HashSet;

use crate::models::{Catalog, Identified, ScheduleContext};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A catalog key differs from the entity id stored under it.
    MismatchedId,
    /// Two entities of one catalog share an id.
    DuplicateId,
    /// A room, item or content item references a missing type.
    UnknownType,
    /// An item references a missing content item.
    UnknownContent,
    /// A scheduled item references a missing room.
    UnknownRoom,
    /// A scheduled session references a missing time slot.
    UnknownTimeSlot,
    /// A scheduled item lacks its slot or dates.
    IncompleteAssignment,
    /// A time slot ends before it starts.
    InvalidTimeSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a timetable document.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues in
/// collection order.
pub fn validate_input(ctx: &ScheduleContext) -> ValidationResult {
    let mut errors = Vec::new();

    check_ids("room", &ctx.rooms, &mut errors);
    check_ids("time slot", &ctx.time_slots, &mut errors);
    check_ids("type", &ctx.types, &mut errors);
    check_ids("session", &ctx.sessions, &mut errors);
    check_ids("event", &ctx.events, &mut errors);
    check_ids("content", &ctx.contents, &mut errors);

    let mut type_ref = |owner: &str, id: &str, type_id: &Option<String>| {
        if let Some(type_id) = type_id {
            if !ctx.types.contains_key(type_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownType,
                    format!("{owner} '{id}' references unknown type '{type_id}'"),
                ));
            }
        }
    };
    for room in ctx.rooms.values() {
        type_ref("room", &room.id, &room.type_id);
    }
    for session in ctx.sessions.values() {
        type_ref("session", &session.id, &session.type_id);
    }
    for event in ctx.events.values() {
        type_ref("event", &event.id, &event.type_id);
    }
    for content in ctx.contents.values() {
        type_ref("content", &content.id, &content.type_id);
    }

    for slot in ctx.time_slots.values() {
        if slot.end_ms() < slot.start_ms() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeSlot,
                format!("time slot '{}' ends before it starts", slot.id),
            ));
        }
    }

    for item in ctx.item_refs().map(|r| ctx.item(r)) {
        for content_id in item.content_ids() {
            if !ctx.contents.contains_key(content_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownContent,
                    format!(
                        "{} '{}' references unknown content '{}'",
                        item.kind(),
                        item.id(),
                        content_id
                    ),
                ));
            }
        }
    }

    for session in ctx.sessions.values().filter(|s| s.is_scheduled) {
        let Some(room_id) = session.room_id.as_deref().filter(|r| !r.is_empty()) else {
            continue;
        };
        if !ctx.rooms.contains_key(room_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRoom,
                format!("session '{}' is scheduled in unknown room '{}'", session.id, room_id),
            ));
        }
        match &session.time_slot_id {
            Some(slot_id) if !ctx.time_slots.contains_key(slot_id) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTimeSlot,
                    format!(
                        "session '{}' is scheduled in unknown time slot '{}'",
                        session.id, slot_id
                    ),
                ));
            }
            Some(_) => {}
            None => errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteAssignment,
                format!("session '{}' is scheduled without a time slot", session.id),
            )),
        }
    }

    for event in ctx.events.values().filter(|e| e.is_scheduled) {
        let Some(room_id) = event.room_id.as_deref().filter(|r| !r.is_empty()) else {
            continue;
        };
        if !ctx.rooms.contains_key(room_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRoom,
                format!("event '{}' is scheduled in unknown room '{}'", event.id, room_id),
            ));
        }
        if event.start_date.is_none() || event.end_date.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteAssignment,
                format!("event '{}' is scheduled without start and end dates", event.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_ids<T: Identified>(label: &str, catalog: &Catalog<T>, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for (key, value) in catalog.iter() {
        if key != value.id() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MismatchedId,
                format!("{label} stored under '{key}' has id '{}'", value.id()),
            ));
        }
        if !seen.insert(value.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("duplicate {label} id: {}", value.id()),
            ));
        }
    }
}
