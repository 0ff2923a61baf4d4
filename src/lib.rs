//! Conference timetable autoscheduler.
//!
//! Assigns sessions and events to the cells of a room × time-slot grid,
//! subject to a prioritized, pluggable set of compatibility conditions.
//! Sessions take one cell each; events take a run of consecutive cells in
//! one room on one day.
//!
//! # Modules
//!
//! - **`models`**: Document entities (`Room`, `TimeSlot`, `Session`, `Event`,
//!   `ContentItem`, `ItemType`), the `ScheduleContext`, the `ScheduleGrid`
//!   and the `ScheduleResult` projection
//! - **`conditions`**: `Condition` trait, prioritized `ConditionSet`, built-in rules
//! - **`ordering`**: Item ordering rules and the sequential `RuleEngine`
//! - **`policy`**: Conditions + ordering bundle, from code or `PolicyConfig`
//! - **`scheduler`**: Priority-relaxing `Autoscheduler`, run pipeline, KPIs
//! - **`overlap`**: Time-slot overlap analysis
//! - **`validation`**: Reference-integrity checks of input documents
//! - **`document`**: JSON input and result/log output
//!
//! # Example
//!
//! ```
//! use u_timetable::diagnostics::DiagnosticLog;
//! use u_timetable::models::ScheduleContext;
//! use u_timetable::policy::Policy;
//! use u_timetable::scheduler::{run, RunOptions};
//!
//! let mut ctx: ScheduleContext = serde_json::from_str(r#"{
//!     "rooms": {"R1": {"id": "R1", "typeId": "paper"}},
//!     "timeSlots": {"T1": {"id": "T1", "startDate": "2024-06-03T09:00:00Z",
//!                          "endDate": "2024-06-03T10:00:00Z", "type": "SESSION"}},
//!     "types": {"paper": {"id": "paper", "name": "Paper", "duration": 20}},
//!     "contents": {"C1": {"id": "C1", "typeId": "paper", "authors": []}},
//!     "sessions": {"S1": {"id": "S1", "typeId": "paper", "contentIds": ["C1"]}}
//! }"#).unwrap();
//!
//! let mut log = DiagnosticLog::new();
//! run(&mut ctx, &Policy::conference(), RunOptions::default(), &mut log).unwrap();
//! assert_eq!(ctx.result().session("S1").unwrap().time_slot_id.as_deref(), Some("T1"));
//! ```

pub mod conditions;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod duration;
pub mod error;
pub mod models;
pub mod ordering;
pub mod overlap;
pub mod policy;
pub mod scheduler;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use config::PolicyConfig;
pub use error::{Result, TimetableError};
pub use policy::Policy;
