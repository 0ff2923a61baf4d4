//! Schedule grid model.
//!
//! The grid is the cross product of rooms and time slots. Every
//! (room, time slot) pair is one [`Cell`]; cells live in a single arena and
//! are reachable through three views:
//!
//! - **duration order**: ascending slot duration, used for session placement
//!   so each session lands in the tightest slot that fits it
//! - **columns**: room → cells in slot order
//! - **rows**: slot → cells in room order, used for people-conflict checks
//!
//! Cells hold catalog positions into the [`ScheduleContext`] that built them;
//! they never own rooms, slots or items.

use std::collections::HashMap;
use tracing::debug;

use super::{Catalog, ItemRef, ScheduleContext, TimeSlot};
use crate::duration::time_slot_duration_ms;
use crate::error::{Result, TimetableError};

/// One (room, time slot) placement cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Room position in the context.
    pub room: usize,
    /// Time slot position in the context.
    pub time_slot: usize,
    /// Room id.
    pub room_id: String,
    /// Time slot id.
    pub time_slot_id: String,
    /// Slot duration (ms).
    pub duration_ms: i64,
    /// Item type the room is set up for.
    pub room_type_id: Option<String>,
    /// Sessions occupying the cell (positions in the context).
    pub sessions: Vec<usize>,
    /// Events occupying the cell (positions in the context).
    pub events: Vec<usize>,
}

impl Cell {
    /// Whether nothing occupies the cell.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.events.is_empty()
    }

    /// Every occupant, sessions first.
    pub fn occupants(&self) -> impl Iterator<Item = ItemRef> + '_ {
        self.sessions
            .iter()
            .map(|&s| ItemRef::Session(s))
            .chain(self.events.iter().map(|&e| ItemRef::Event(e)))
    }
}

/// Room × time-slot grid.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGrid {
    cells: Vec<Cell>,
    by_duration: Vec<usize>,
    /// `columns[room][slot]` → cell index.
    columns: Vec<Vec<usize>>,
    /// `rows[slot][room]` → cell index.
    rows: Vec<Vec<usize>>,
    room_index: HashMap<String, usize>,
    slot_index: HashMap<String, usize>,
}

impl ScheduleGrid {
    /// Builds an empty grid with one cell per room × time slot.
    ///
    /// Cells are created room by room, each room walking the slots in
    /// collection order. The duration view is a stable ascending sort of
    /// that sequence.
    ///
    /// # Errors
    /// [`TimetableError::UnknownType`] if a room references a missing type.
    pub fn build(ctx: &ScheduleContext) -> Result<Self> {
        let room_count = ctx.rooms.len();
        let slot_count = ctx.time_slots.len();
        let mut grid = Self {
            cells: Vec::with_capacity(room_count * slot_count),
            by_duration: Vec::with_capacity(room_count * slot_count),
            columns: vec![Vec::with_capacity(slot_count); room_count],
            rows: vec![Vec::with_capacity(room_count); slot_count],
            room_index: HashMap::with_capacity(room_count),
            slot_index: HashMap::with_capacity(slot_count),
        };

        for (r, (room_key, room)) in ctx.rooms.iter().enumerate() {
            grid.room_index.insert(room_key.to_string(), r);
            let room_type_id = match &room.type_id {
                Some(type_id) if ctx.types.contains_key(type_id) => Some(type_id.clone()),
                Some(type_id) => return Err(TimetableError::UnknownType(type_id.clone())),
                None => None,
            };

            for (t, (slot_key, slot)) in ctx.time_slots.iter().enumerate() {
                if r == 0 {
                    grid.slot_index.insert(slot_key.to_string(), t);
                }
                let index = grid.cells.len();
                grid.cells.push(Cell {
                    room: r,
                    time_slot: t,
                    room_id: room.id.clone(),
                    time_slot_id: slot.id.clone(),
                    duration_ms: time_slot_duration_ms(slot),
                    room_type_id: room_type_id.clone(),
                    sessions: Vec::new(),
                    events: Vec::new(),
                });
                grid.columns[r].push(index);
                grid.rows[t].push(index);
                grid.by_duration.push(index);
            }
        }

        let cells = &grid.cells;
        grid.by_duration.sort_by_key(|&i| cells[i].duration_ms);

        debug!(
            rooms = room_count,
            time_slots = slot_count,
            cells = grid.cells.len(),
            "schedule grid built"
        );
        Ok(grid)
    }

    /// Puts a session into a cell and records the assignment on the session.
    ///
    /// Performs no compatibility checks.
    pub fn place_session(&mut self, ctx: &mut ScheduleContext, cell: usize, session: usize) {
        let target = &mut self.cells[cell];
        target.sessions.push(session);

        let s = ctx.sessions.at_mut(session);
        s.room_id = Some(target.room_id.clone());
        s.time_slot_id = Some(target.time_slot_id.clone());
        s.is_scheduled = true;
    }

    /// Puts an event into every given cell and records the covered span.
    ///
    /// The event takes the room of the first cell, the start of the first
    /// cell's slot and the end of the last cell's slot. An empty run is
    /// ignored.
    pub fn place_event(&mut self, ctx: &mut ScheduleContext, cells: &[usize], event: usize) {
        let (Some(&first), Some(&last)) = (cells.first(), cells.last()) else {
            return;
        };
        for &cell in cells {
            self.cells[cell].events.push(event);
        }

        let start = ctx.time_slots.at(self.cells[first].time_slot).start_date.clone();
        let end = ctx.time_slots.at(self.cells[last].time_slot).end_date.clone();
        let e = ctx.events.at_mut(event);
        e.room_id = Some(self.cells[first].room_id.clone());
        e.start_date = Some(start);
        e.end_date = Some(end);
        e.is_scheduled = true;
    }

    /// Registers items that arrive already scheduled, without checking conditions.
    ///
    /// Sessions go into the cell named by their room and slot. Events go
    /// into every cell of their room whose slot lies inside the event's
    /// `[start, end]`. Items without a room are skipped.
    ///
    /// Returns the number of items registered.
    ///
    /// # Errors
    /// Unknown room or slot references, and scheduled items missing the
    /// slot or dates needed to locate their cells.
    pub fn preload(&mut self, ctx: &ScheduleContext) -> Result<usize> {
        let mut loaded = 0;

        for (pos, session) in ctx.sessions.values().enumerate() {
            let assigned = session
                .room_id
                .as_deref()
                .filter(|r| session.is_scheduled && !r.is_empty());
            let Some(room_id) = assigned else {
                continue;
            };
            let slot_id = session.time_slot_id.as_deref().ok_or_else(|| {
                TimetableError::IncompleteAssignment {
                    kind: "session",
                    id: session.id.clone(),
                    reason: "missing time slot",
                }
            })?;
            let cell = self.lookup(room_id, slot_id)?;
            self.cells[cell].sessions.push(pos);
            loaded += 1;
        }

        for (pos, event) in ctx.events.values().enumerate() {
            let assigned = event.room_id.as_deref().filter(|r| event.is_scheduled && !r.is_empty());
            let Some(room_id) = assigned else {
                continue;
            };
            let incomplete = |reason| TimetableError::IncompleteAssignment {
                kind: "event",
                id: event.id.clone(),
                reason,
            };
            let start = event.start_date.as_ref().ok_or_else(|| incomplete("missing start date"))?;
            let end = event.end_date.as_ref().ok_or_else(|| incomplete("missing end date"))?;
            let room = *self
                .room_index
                .get(room_id)
                .ok_or_else(|| TimetableError::UnknownRoom(room_id.to_string()))?;

            for &cell in &self.columns[room] {
                let slot = ctx.time_slots.at(self.cells[cell].time_slot);
                if slot.start_ms() >= start.millis() && slot.end_ms() <= end.millis() {
                    self.cells[cell].events.push(pos);
                }
            }
            loaded += 1;
        }

        debug!(items = loaded, "preloaded scheduled items");
        Ok(loaded)
    }

    fn lookup(&self, room_id: &str, slot_id: &str) -> Result<usize> {
        let room = *self
            .room_index
            .get(room_id)
            .ok_or_else(|| TimetableError::UnknownRoom(room_id.to_string()))?;
        let slot = *self
            .slot_index
            .get(slot_id)
            .ok_or_else(|| TimetableError::UnknownTimeSlot(slot_id.to_string()))?;
        Ok(self.columns[room][slot])
    }

    /// Cell by index.
    #[inline]
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// All cells, room-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell indices by ascending slot duration.
    pub fn ordered_by_duration(&self) -> &[usize] {
        &self.by_duration
    }

    /// Cell indices of one room, in slot collection order.
    pub fn column(&self, room: usize) -> &[usize] {
        &self.columns[room]
    }

    /// Cell indices of one slot, in room collection order.
    pub fn row(&self, time_slot: usize) -> &[usize] {
        &self.rows[time_slot]
    }

    /// Cell index for a room id and slot id.
    pub fn cell_at(&self, room_id: &str, slot_id: &str) -> Option<usize> {
        self.lookup(room_id, slot_id).ok()
    }

    /// Cell indices of one room, ordered by slot start (stable).
    pub fn column_by_start(&self, room: usize, slots: &Catalog<TimeSlot>) -> Vec<usize> {
        let mut column = self.columns[room].clone();
        column.sort_by_key(|&cell| slots.at(self.cells[cell].time_slot).start_ms());
        column
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of time slots.
    pub fn slot_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}
