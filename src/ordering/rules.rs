//! Built-in ordering rules.
//!
//! | Rule | Score |
//! |------|-------|
//! | `EVENTS_FIRST` | events 0, sessions 1 |
//! | `SESSION_TYPE_PRECEDENCE` | position of the session type name in a precedence list |
//! | `SHORTEST_DURATION` | required duration (ms) |
//!
//! All rules return lower scores for items to attempt first.

use super::{OrderingRule, RuleScore};
use crate::duration::item_duration_ms;
use crate::error::{Result, TimetableError};
use crate::models::{Item, ScheduleContext};

/// Session type names in conference precedence.
pub const CONFERENCE_TYPE_ORDER: [&str; 6] =
    ["course", "panel", "case study", "sig", "workshop", "paper"];

/// Events before sessions.
///
/// Events need runs of free cells in one room, which get scarce once
/// sessions are spread over the grid.
#[derive(Debug, Clone, Copy)]
pub struct EventsFirst;

impl OrderingRule for EventsFirst {
    fn name(&self) -> &'static str {
        "EVENTS_FIRST"
    }

    fn evaluate(&self, item: Item<'_>, _ctx: &ScheduleContext) -> Result<RuleScore> {
        Ok(match item {
            Item::Event(_) => 0.0,
            Item::Session(_) => 1.0,
        })
    }

    fn description(&self) -> &'static str {
        "Events before sessions"
    }
}

/// Sessions ranked by the position of their type name in a fixed list.
///
/// Names compare case-insensitively. Untyped sessions and sessions whose
/// type name is not listed rank after every listed type. Events score 0.
#[derive(Debug, Clone)]
pub struct SessionTypePrecedence {
    order: Vec<String>,
}

impl SessionTypePrecedence {
    /// Creates the rule from type names, highest precedence first.
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            order: order
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Course, panel, case study, sig, workshop, paper.
    pub fn conference() -> Self {
        Self::new(CONFERENCE_TYPE_ORDER)
    }

    /// Precedence list (lower-cased).
    pub fn order(&self) -> &[String] {
        &self.order
    }

    fn rank(&self, type_name: &str) -> usize {
        let name = type_name.to_lowercase();
        self.order
            .iter()
            .position(|listed| *listed == name)
            .unwrap_or(self.order.len())
    }
}

impl OrderingRule for SessionTypePrecedence {
    fn name(&self) -> &'static str {
        "SESSION_TYPE_PRECEDENCE"
    }

    fn evaluate(&self, item: Item<'_>, ctx: &ScheduleContext) -> Result<RuleScore> {
        let Item::Session(session) = item else {
            return Ok(0.0);
        };
        let rank = match &session.type_id {
            Some(type_id) => {
                let item_type = ctx
                    .types
                    .get(type_id)
                    .ok_or_else(|| TimetableError::UnknownType(type_id.clone()))?;
                self.rank(&item_type.name)
            }
            None => self.order.len(),
        };
        Ok(rank as f64)
    }

    fn description(&self) -> &'static str {
        "Session type precedence"
    }
}

/// Shorter items first.
#[derive(Debug, Clone, Copy)]
pub struct ShortestDuration;

impl OrderingRule for ShortestDuration {
    fn name(&self) -> &'static str {
        "SHORTEST_DURATION"
    }

    fn evaluate(&self, item: Item<'_>, ctx: &ScheduleContext) -> Result<RuleScore> {
        Ok(item_duration_ms(item, &ctx.contents, &ctx.types)? as f64)
    }

    fn description(&self) -> &'static str {
        "Shortest required duration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::conference;
    use crate::models::{Event, ItemType, Session};

    #[test]
    fn test_events_first() {
        let ctx = conference();
        let s = Session::new("S");
        let e = Event::new("E");
        assert_eq!(EventsFirst.evaluate(Item::Event(&e), &ctx).unwrap(), 0.0);
        assert_eq!(EventsFirst.evaluate(Item::Session(&s), &ctx).unwrap(), 1.0);
    }

    #[test]
    fn test_type_precedence_ranks() {
        let ctx = conference().with_type(ItemType::new("sig", "SIG", 60));
        let rule = SessionTypePrecedence::conference();
        let score = |type_id: Option<&str>| {
            let mut s = Session::new("S");
            s.type_id = type_id.map(str::to_string);
            rule.evaluate(Item::Session(&s), &ctx).unwrap()
        };

        assert_eq!(score(Some("course")), 0.0);
        assert_eq!(score(Some("sig")), 3.0);
        assert_eq!(score(Some("paper")), 5.0);
        // listed after every known type
        assert_eq!(score(Some("plenary")), 6.0);
        assert_eq!(score(None), 6.0);
    }

    #[test]
    fn test_type_precedence_events_score_zero() {
        let ctx = conference();
        let e = Event::new("E").with_type("reception");
        let rule = SessionTypePrecedence::conference();
        assert_eq!(rule.evaluate(Item::Event(&e), &ctx).unwrap(), 0.0);
    }

    #[test]
    fn test_type_precedence_unknown_type() {
        let ctx = conference();
        let s = Session::new("S").with_type("ghost");
        let err = SessionTypePrecedence::conference()
            .evaluate(Item::Session(&s), &ctx)
            .unwrap_err();
        assert!(matches!(err, TimetableError::UnknownType(id) if id == "ghost"));
    }

    #[test]
    fn test_custom_precedence_is_case_insensitive() {
        let rule = SessionTypePrecedence::new(["Paper", "Workshop"]);
        assert_eq!(rule.order(), &["paper".to_string(), "workshop".to_string()]);
        let ctx = conference();
        let s = Session::new("S").with_type("workshop");
        assert_eq!(rule.evaluate(Item::Session(&s), &ctx).unwrap(), 1.0);
    }

    #[test]
    fn test_shortest_duration() {
        let ctx = conference();
        let short = Session::new("A").with_content("P1");
        let long = Session::new("B").with_content("P1").with_content("W1");
        let a = ShortestDuration.evaluate(Item::Session(&short), &ctx).unwrap();
        let b = ShortestDuration.evaluate(Item::Session(&long), &ctx).unwrap();
        assert_eq!(a, 1_800_000.0);
        assert_eq!(b, 5_400_000.0);
    }
}
