//! Agenda grid builder.
//!
//! Projects sessions into day, week and month buckets for display. It
//! makes no business decisions of its own.

pub mod bucket;
pub mod grid;

pub use bucket::{AgendaEntry, CalendarMonth, DayBucket};
pub use grid::AgendaGridBuilder;
