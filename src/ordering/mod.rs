//! Item ordering rules and rule engine.
//!
//! Decides the sequence in which unscheduled items are attempted. Greedy
//! placement never revisits a decision, so this order shapes the outcome.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ordering::{rules, RuleEngine};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::EventsFirst)
//!     .with_rule(rules::ShortestDuration);
//! assert_eq!(engine.rule_names(), vec!["EVENTS_FIRST", "SHORTEST_DURATION"]);
//! ```

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::error::Result;
use crate::models::{Item, ScheduleContext};
use std::fmt::Debug;

/// Score returned by an ordering rule.
///
/// Lower scores = attempted earlier.
pub type RuleScore = f64;

/// A rule ranking items for placement.
///
/// # Score Convention
/// **Lower score = attempted first.**
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "EVENTS_FIRST").
    fn name(&self) -> &'static str;

    /// Scores an item.
    ///
    /// # Errors
    /// Broken references met while scoring (unknown content or type).
    fn evaluate(&self, item: Item<'_>, ctx: &ScheduleContext) -> Result<RuleScore>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
