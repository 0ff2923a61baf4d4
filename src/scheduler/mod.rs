//! Autoscheduler and run pipeline.
//!
//! [`run`] drives one full scheduling pass over a [`ScheduleContext`]:
//!
//! 1. overlap analysis annotates the time slots
//! 2. the grid is built
//! 3. either every assignment is cleared (unschedule-all mode), or items
//!    that arrive scheduled are preloaded and the [`Autoscheduler`] places
//!    the rest
//!
//! # KPI
//!
//! [`ScheduleKpi`] summarizes what the grid holds after the run.

mod autoscheduler;
mod kpi;

pub use autoscheduler::Autoscheduler;
pub use kpi::ScheduleKpi;

use tracing::{info, warn};

use crate::diagnostics::DiagnosticSink;
use crate::error::Result;
use crate::models::{DayBoundary, ScheduleContext, ScheduleGrid};
use crate::overlap::mark_overlaps;
use crate::policy::Policy;

/// Result of one priority round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Priority ceiling of the round.
    pub priority: u32,
    /// Items attempted.
    pub attempted: usize,
    /// Items placed.
    pub placed: usize,
}

/// Switches for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Keep relaxing conditions for leftovers, down to priority 0.
    pub relax_remaining: bool,
    /// Clear every assignment and skip scheduling.
    pub unschedule_all: bool,
    /// Time zone for the one-day rule of event runs.
    pub day_boundary: DayBoundary,
}

impl RunOptions {
    /// Sets relax mode.
    pub fn with_relax_remaining(mut self, relax: bool) -> Self {
        self.relax_remaining = relax;
        self
    }

    /// Sets unschedule-all mode.
    pub fn with_unschedule_all(mut self, unschedule_all: bool) -> Self {
        self.unschedule_all = unschedule_all;
        self
    }

    /// Sets the day boundary.
    pub fn with_day_boundary(mut self, day_boundary: DayBoundary) -> Self {
        self.day_boundary = day_boundary;
        self
    }
}

/// What a run produced besides the mutated context.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The grid as it stands after the run.
    pub grid: ScheduleGrid,
    /// Executed rounds (empty in unschedule-all mode).
    pub rounds: Vec<RoundOutcome>,
    /// Summary metrics.
    pub kpi: ScheduleKpi,
}

/// Runs the full pipeline, mutating `ctx` in place.
///
/// # Errors
/// Broken references in the document (unknown rooms, slots, types or
/// content, incomplete assignments of preloaded items).
pub fn run(
    ctx: &mut ScheduleContext,
    policy: &Policy,
    options: RunOptions,
    sink: &mut dyn DiagnosticSink,
) -> Result<RunOutcome> {
    let overlapped = mark_overlaps(&mut ctx.time_slots);
    let mut grid = ScheduleGrid::build(ctx)?;
    info!(
        rooms = grid.room_count(),
        time_slots = grid.slot_count(),
        overlapped,
        "grid ready"
    );

    let rounds = if options.unschedule_all {
        ctx.unschedule_all();
        info!("all assignments cleared");
        Vec::new()
    } else {
        let preloaded = grid.preload(ctx)?;
        info!(preloaded, "existing assignments loaded");
        Autoscheduler::new(policy)
            .with_relax_remaining(options.relax_remaining)
            .with_day_boundary(options.day_boundary)
            .run(ctx, &mut grid, sink)?
    };

    let kpi = ScheduleKpi::calculate(ctx, &grid);
    if !options.unschedule_all && kpi.unscheduled() > 0 {
        warn!(
            sessions = kpi.sessions_unscheduled,
            events = kpi.events_unscheduled,
            "items left unscheduled"
        );
    }

    Ok(RunOutcome { grid, rounds, kpi })
}
