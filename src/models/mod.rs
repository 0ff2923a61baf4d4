//! Timetable domain models.
//!
//! Provides the entities of the input document and the grid that the
//! autoscheduler fills.
//!
//! # Domain Mappings
//!
//! | u-timetable | Conference | Generic scheduling |
//! |-------------|------------|--------------------|
//! | Room | Lecture hall | Resource |
//! | TimeSlot | Programme slot | Time bucket |
//! | Session | Paper session | Single-bucket job |
//! | Event | Reception, tour | Multi-bucket job |
//! | Cell | Room at a slot | Resource × bucket |

mod catalog;
mod content;
mod context;
mod item;
mod item_type;
mod result;
mod room;
mod schedule;
mod time_slot;
mod timestamp;

pub use catalog::{Catalog, Identified};
pub use content::{Author, ContentItem};
pub use context::ScheduleContext;
pub use item::{Event, Item, ItemKind, ItemRef, Session};
pub use item_type::ItemType;
pub use result::{EventAssignment, ScheduleResult, SessionAssignment};
pub use room::Room;
pub use schedule::{Cell, ScheduleGrid};
pub use time_slot::TimeSlot;
pub use timestamp::{DayBoundary, Timestamp};
