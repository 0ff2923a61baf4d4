//! Condition engine.
//!
//! A condition is a named predicate deciding whether an item may occupy a
//! cell given the current grid. Each condition is registered with:
//!
//! - a **priority**: `0` is mandatory and always enforced; higher values
//!   are relaxable and only enforced while the round's priority ceiling is
//!   at least that high
//! - an **applicability**: sessions, events, or both
//!
//! # Usage
//!
//! ```
//! use u_timetable::conditions::{rules, Applicability, ConditionSet};
//!
//! let conditions = ConditionSet::new()
//!     .with_condition(rules::CellEmpty, 0, Applicability::All)
//!     .with_condition(rules::RoomTypeCompatible, 2, Applicability::All);
//! assert_eq!(conditions.max_priority(), 2);
//! ```

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::models::{Cell, Item, ItemKind, ScheduleContext, ScheduleGrid};

/// Generic slot tag accepted by every session type.
pub const GENERIC_SLOT_TYPE: &str = "SESSION";

/// Session type names that never go into regular session cells.
pub const EXCLUDED_SESSION_TYPES: [&str; 4] = ["event", "invited talk", "operations", "plenary"];

/// A compatibility predicate between a cell and an item.
pub trait Condition: Send + Sync + Debug {
    /// Condition name, used in diagnostics and configuration.
    fn name(&self) -> &'static str;

    /// Whether `item` may occupy `cell`.
    ///
    /// # Errors
    /// Broken references met while evaluating (unknown content or type).
    fn check(
        &self,
        cell: &Cell,
        item: Item<'_>,
        ctx: &ScheduleContext,
        grid: &ScheduleGrid,
    ) -> Result<bool>;
}

/// Item kinds a condition governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    /// Sessions only.
    #[serde(alias = "session")]
    Sessions,
    /// Events only.
    #[serde(alias = "event")]
    Events,
    /// Sessions and events.
    All,
}

impl Applicability {
    /// Whether items of `kind` are governed.
    pub fn includes(self, kind: ItemKind) -> bool {
        matches!(
            (self, kind),
            (Applicability::All, _)
                | (Applicability::Sessions, ItemKind::Session)
                | (Applicability::Events, ItemKind::Event)
        )
    }
}

#[derive(Clone)]
struct Registered {
    condition: Arc<dyn Condition>,
    priority: u32,
    applies_to: Applicability,
}

/// Ordered set of prioritized conditions.
///
/// Conditions are evaluated in registration order.
#[derive(Clone, Default)]
pub struct ConditionSet {
    entries: Vec<Registered>,
}

impl ConditionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference conference rule set.
    ///
    /// | # | Condition | Priority | Applies to |
    /// |---|-----------|----------|------------|
    /// | 1 | `item_not_scheduled` | 0 | all |
    /// | 2 | `cell_empty` | 0 | all |
    /// | 3 | `duration_fits` | 0 | sessions |
    /// | 4 | `content_type_compatible` | 0 | sessions |
    /// | 5 | `time_slot_not_overlapped` | 0 | all |
    /// | 6 | `people_compatible` | 0 | all |
    /// | 7 | `time_slot_type_compatible` | 1 | sessions |
    /// | 8 | `room_type_compatible` | 2 | all |
    pub fn conference() -> Self {
        Self::new()
            .with_condition(rules::ItemNotScheduled, 0, Applicability::All)
            .with_condition(rules::CellEmpty, 0, Applicability::All)
            .with_condition(rules::DurationFits, 0, Applicability::Sessions)
            .with_condition(
                rules::ContentTypeCompatible::new(EXCLUDED_SESSION_TYPES),
                0,
                Applicability::Sessions,
            )
            .with_condition(rules::TimeSlotNotOverlapped, 0, Applicability::All)
            .with_condition(rules::PeopleCompatible, 0, Applicability::All)
            .with_condition(
                rules::TimeSlotTypeCompatible::new(GENERIC_SLOT_TYPE),
                1,
                Applicability::Sessions,
            )
            .with_condition(rules::RoomTypeCompatible, 2, Applicability::All)
    }

    /// Builder: registers a condition.
    pub fn with_condition<C: Condition + 'static>(
        mut self,
        condition: C,
        priority: u32,
        applies_to: Applicability,
    ) -> Self {
        self.push(Arc::new(condition), priority, applies_to);
        self
    }

    /// Registers a shared condition.
    pub fn push(
        &mut self,
        condition: Arc<dyn Condition>,
        priority: u32,
        applies_to: Applicability,
    ) {
        self.entries.push(Registered {
            condition,
            priority,
            applies_to,
        });
    }

    /// Highest registered priority (0 when empty).
    pub fn max_priority(&self) -> u32 {
        self.entries.iter().map(|e| e.priority).max().unwrap_or(0)
    }

    /// `(name, priority, applicability)` of every condition, in order.
    pub fn describe(&self) -> Vec<(&'static str, u32, Applicability)> {
        self.entries
            .iter()
            .map(|e| (e.condition.name(), e.priority, e.applies_to))
            .collect()
    }

    /// Number of registered conditions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no condition is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `item` may occupy `cell` under the ceiling `max_priority`.
    ///
    /// Evaluates every condition that governs the item's kind and has a
    /// priority ≤ `max_priority`, in order, stopping at the first failure.
    /// The failure is reported to `sink` as one line naming the item, the
    /// cell and the condition.
    pub fn evaluate(
        &self,
        max_priority: u32,
        cell: &Cell,
        item: Item<'_>,
        ctx: &ScheduleContext,
        grid: &ScheduleGrid,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<bool> {
        let kind = item.kind();
        let applicable = self
            .entries
            .iter()
            .filter(|e| e.applies_to.includes(kind) && e.priority <= max_priority);

        for entry in applicable {
            if !entry.condition.check(cell, item, ctx, grid)? {
                sink.record(format!(
                    "condition {} failed for {}:{} in cell[room:{}][time_slot:{}]",
                    entry.condition.name(),
                    kind,
                    item.id(),
                    cell.room_id,
                    cell.time_slot_id,
                ));
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Debug for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionSet")
            .field(
                "conditions",
                &self
                    .entries
                    .iter()
                    .map(|e| {
                        format!("{}(p={}, {:?})", e.condition.name(), e.priority, e.applies_to)
                    })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
