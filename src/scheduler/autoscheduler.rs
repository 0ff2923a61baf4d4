//! Priority-relaxing greedy autoscheduler.
//!
//! # Algorithm
//!
//! 1. `P` = highest condition priority. Rounds run with ceilings `P`,
//!    `P - 1`, ..., `0`; only the first round runs unless relax mode is on.
//! 2. Each round orders the currently unscheduled items with the policy's
//!    rule engine.
//! 3. A session goes into the first cell of the duration-ascending view
//!    that passes the condition set.
//! 4. An event scans each room's cells by slot start, growing a run of
//!    consecutive passing cells on one calendar day, and commits as soon as
//!    the run spans its required duration.
//!
//! Decisions are never revisited. Priority-0 conditions hold in every round.
//!
//! # Complexity
//! O(r * n * c * k) for r rounds, n items, c cells and k conditions.

use tracing::{debug, info};

use super::RoundOutcome;
use crate::diagnostics::DiagnosticSink;
use crate::duration::{item_duration_ms, span_duration_ms};
use crate::error::Result;
use crate::models::{DayBoundary, ItemRef, ScheduleContext, ScheduleGrid};
use crate::policy::Policy;

/// Greedy autoscheduler over a [`ScheduleGrid`].
///
/// # Example
///
/// ```
/// use u_timetable::diagnostics::DiagnosticLog;
/// use u_timetable::models::{
///     ItemType, Room, ScheduleContext, ScheduleGrid, Session, TimeSlot, Timestamp,
/// };
/// use u_timetable::policy::Policy;
/// use u_timetable::scheduler::Autoscheduler;
///
/// let mut ctx = ScheduleContext::new()
///     .with_type(ItemType::new("talk", "Talk", 30))
///     .with_room(Room::new("R1").with_type("talk"))
///     .with_time_slot(TimeSlot::new(
///         "T1",
///         Timestamp::parse("2024-06-03T09:00:00Z").unwrap(),
///         Timestamp::parse("2024-06-03T09:30:00Z").unwrap(),
///     ))
///     .with_session(Session::new("S1").with_type("talk"));
/// let mut grid = ScheduleGrid::build(&ctx).unwrap();
/// let mut log = DiagnosticLog::new();
///
/// let policy = Policy::conference();
/// let rounds = Autoscheduler::new(&policy)
///     .run(&mut ctx, &mut grid, &mut log)
///     .unwrap();
/// assert_eq!(rounds[0].placed, 1);
/// assert!(ctx.sessions.get("S1").unwrap().is_scheduled);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Autoscheduler<'p> {
    policy: &'p Policy,
    relax_remaining: bool,
    day_boundary: DayBoundary,
}

impl<'p> Autoscheduler<'p> {
    /// Creates an autoscheduler running a single round.
    pub fn new(policy: &'p Policy) -> Self {
        Self {
            policy,
            relax_remaining: false,
            day_boundary: DayBoundary::default(),
        }
    }

    /// Re-attempts leftovers with progressively fewer relaxable conditions.
    pub fn with_relax_remaining(mut self, relax: bool) -> Self {
        self.relax_remaining = relax;
        self
    }

    /// Sets the time zone used for the one-day rule of event runs.
    pub fn with_day_boundary(mut self, day_boundary: DayBoundary) -> Self {
        self.day_boundary = day_boundary;
        self
    }

    /// Priority ceilings of the rounds to run, highest first.
    pub fn round_priorities(&self) -> Vec<u32> {
        let top = self.policy.conditions.max_priority();
        if self.relax_remaining {
            (0..=top).rev().collect()
        } else {
            vec![top]
        }
    }

    /// Places unscheduled items into the grid, mutating both the grid and
    /// the items' assignments.
    ///
    /// # Errors
    /// Broken references met while ordering or checking items.
    pub fn run(
        &self,
        ctx: &mut ScheduleContext,
        grid: &mut ScheduleGrid,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<RoundOutcome>> {
        let mut rounds = Vec::new();

        for priority in self.round_priorities() {
            let order = self.policy.ordering.order_unscheduled(ctx)?;
            let mut placed = 0;

            for &item in &order {
                let done = match item {
                    ItemRef::Session(session) => {
                        self.schedule_session(ctx, grid, priority, session, sink)?
                    }
                    ItemRef::Event(event) => {
                        self.schedule_event(ctx, grid, priority, event, sink)?
                    }
                };
                if done {
                    placed += 1;
                }
            }

            info!(
                priority,
                attempted = order.len(),
                placed,
                "scheduling round finished"
            );
            rounds.push(RoundOutcome {
                priority,
                attempted: order.len(),
                placed,
            });
        }

        Ok(rounds)
    }

    fn schedule_session(
        &self,
        ctx: &mut ScheduleContext,
        grid: &mut ScheduleGrid,
        priority: u32,
        session: usize,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<bool> {
        let item = ItemRef::Session(session);
        for i in 0..grid.ordered_by_duration().len() {
            let cell = grid.ordered_by_duration()[i];
            let fits = self.policy.conditions.evaluate(
                priority,
                grid.cell(cell),
                ctx.item(item),
                ctx,
                grid,
                sink,
            )?;
            if fits {
                grid.place_session(ctx, cell, session);
                debug!(
                    session = ctx.sessions.key_at(session),
                    room = %grid.cell(cell).room_id,
                    time_slot = %grid.cell(cell).time_slot_id,
                    "session placed"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn schedule_event(
        &self,
        ctx: &mut ScheduleContext,
        grid: &mut ScheduleGrid,
        priority: u32,
        event: usize,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<bool> {
        let item = ItemRef::Event(event);
        let required = item_duration_ms(ctx.item(item), &ctx.contents, &ctx.types)?;

        for room in 0..grid.room_count() {
            if let Some(run) = self.find_run(ctx, grid, priority, item, room, required, sink)? {
                grid.place_event(ctx, &run, event);
                debug!(
                    event = ctx.events.key_at(event),
                    room = %grid.cell(run[0]).room_id,
                    cells = run.len(),
                    "event placed"
                );
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// First run of consecutive passing cells in `room` spanning `required`.
    #[allow(clippy::too_many_arguments)]
    fn find_run(
        &self,
        ctx: &ScheduleContext,
        grid: &ScheduleGrid,
        priority: u32,
        item: ItemRef,
        room: usize,
        required: i64,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<Vec<usize>>> {
        let slots = &ctx.time_slots;
        let mut run: Vec<usize> = Vec::new();

        for cell in grid.column_by_start(room, slots) {
            let fits = self.policy.conditions.evaluate(
                priority,
                grid.cell(cell),
                ctx.item(item),
                ctx,
                grid,
                sink,
            )?;
            if !fits {
                run.clear();
                continue;
            }

            let slot = slots.at(grid.cell(cell).time_slot);
            if let Some(&first) = run.first() {
                let first_slot = slots.at(grid.cell(first).time_slot);
                if !self.day_boundary.same_day(&first_slot.start_date, &slot.end_date) {
                    run.clear();
                }
            }
            run.push(cell);

            let first_slot = slots.at(grid.cell(run[0]).time_slot);
            if span_duration_ms(first_slot, slot) >= required {
                return Ok(Some(run));
            }
        }
        Ok(None)
    }
}
