//! Output projection of a scheduling run.

use serde::{Deserialize, Serialize, Serializer};

use super::{ScheduleContext, Timestamp};

/// Assignment of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAssignment {
    pub id: String,
    pub room_id: Option<String>,
    pub time_slot_id: Option<String>,
}

/// Assignment of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAssignment {
    pub id: String,
    pub room_id: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub location: Option<serde_json::Value>,
    pub coordinates: Option<serde_json::Value>,
}

/// Every item's assignment, keyed by item id in collection order.
///
/// Unscheduled items are present with `null` assignment fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleResult {
    #[serde(serialize_with = "by_id")]
    pub sessions: Vec<SessionAssignment>,
    #[serde(serialize_with = "by_id")]
    pub events: Vec<EventAssignment>,
}

trait AssignmentId {
    fn assignment_id(&self) -> &str;
}

impl AssignmentId for SessionAssignment {
    fn assignment_id(&self) -> &str {
        &self.id
    }
}

impl AssignmentId for EventAssignment {
    fn assignment_id(&self) -> &str {
        &self.id
    }
}

fn by_id<S, T>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + AssignmentId,
{
    serializer.collect_map(items.iter().map(|a| (a.assignment_id(), a)))
}

impl ScheduleResult {
    /// Projects the assignments held by a context.
    pub fn from_context(ctx: &ScheduleContext) -> Self {
        let sessions = ctx
            .sessions
            .values()
            .map(|s| SessionAssignment {
                id: s.id.clone(),
                room_id: s.room_id.clone(),
                time_slot_id: s.time_slot_id.clone(),
            })
            .collect();
        let events = ctx
            .events
            .values()
            .map(|e| EventAssignment {
                id: e.id.clone(),
                room_id: e.room_id.clone(),
                start_date: e.start_date.clone(),
                end_date: e.end_date.clone(),
                location: e.location.clone(),
                coordinates: e.coordinates.clone(),
            })
            .collect();
        Self { sessions, events }
    }

    /// Assignment of a session by id.
    pub fn session(&self, id: &str) -> Option<&SessionAssignment> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Assignment of an event by id.
    pub fn event(&self, id: &str) -> Option<&EventAssignment> {
        self.events.iter().find(|e| e.id == id)
    }
}
