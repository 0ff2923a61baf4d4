//! Timetable quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled / unscheduled | Item counts per kind |
//! | Occupancy rate | Occupied cells / all cells |
//! | Room occupancy | Occupied slot time / total slot time, per room |

use std::collections::HashMap;

use crate::models::{ScheduleContext, ScheduleGrid};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Sessions holding an assignment.
    pub sessions_scheduled: usize,
    /// Sessions left without one.
    pub sessions_unscheduled: usize,
    /// Events holding an assignment.
    pub events_scheduled: usize,
    /// Events left without one.
    pub events_unscheduled: usize,
    /// Number of grid cells.
    pub cells: usize,
    /// Cells holding at least one item.
    pub occupied_cells: usize,
    /// Fraction of occupied cells (0.0..1.0).
    pub occupancy_rate: f64,
    /// Per-room fraction of slot time occupied (0.0..1.0).
    pub occupancy_by_room: HashMap<String, f64>,
}

impl ScheduleKpi {
    /// Computes KPIs from the context and the grid it was scheduled into.
    pub fn calculate(ctx: &ScheduleContext, grid: &ScheduleGrid) -> Self {
        let sessions_scheduled = ctx.sessions.values().filter(|s| s.is_scheduled).count();
        let events_scheduled = ctx.events.values().filter(|e| e.is_scheduled).count();

        let mut occupancy_by_room = HashMap::with_capacity(grid.room_count());
        for room in 0..grid.room_count() {
            let mut total: i64 = 0;
            let mut busy: i64 = 0;
            for &cell in grid.column(room) {
                let cell = grid.cell(cell);
                total += cell.duration_ms;
                if !cell.is_empty() {
                    busy += cell.duration_ms;
                }
            }
            let rate = if total <= 0 {
                0.0
            } else {
                busy as f64 / total as f64
            };
            occupancy_by_room.insert(ctx.rooms.key_at(room).to_string(), rate);
        }

        let cells = grid.len();
        let occupied_cells = grid.occupied_count();
        let occupancy_rate = if cells == 0 {
            0.0
        } else {
            occupied_cells as f64 / cells as f64
        };

        Self {
            sessions_scheduled,
            sessions_unscheduled: ctx.sessions.len() - sessions_scheduled,
            events_scheduled,
            events_unscheduled: ctx.events.len() - events_scheduled,
            cells,
            occupied_cells,
            occupancy_rate,
            occupancy_by_room,
        }
    }

    /// Items left unscheduled, both kinds.
    pub fn unscheduled(&self) -> usize {
        self.sessions_unscheduled + self.events_unscheduled
    }

    /// Fraction of items scheduled (1.0 when there is nothing to schedule).
    pub fn scheduled_rate(&self) -> f64 {
        let scheduled = self.sessions_scheduled + self.events_scheduled;
        let total = scheduled + self.unscheduled();
        if total == 0 {
            1.0
        } else {
            scheduled as f64 / total as f64
        }
    }
}
