//! Countdown helpers for a session relative to an explicit `now`.

use crate::session::entities::TrainingSession;
use chrono::{DateTime, Utc};

/// Planned end of the session, if it is placed.
pub fn end_at(session: &TrainingSession) -> Option<DateTime<Utc>> {
    session.end_at()
}

/// Whole minutes until the start; negative once started.
pub fn minutes_until_start(session: &TrainingSession, now: DateTime<Utc>) -> Option<i64> {
    session.start_at.map(|start| (start - now).num_minutes())
}

/// Whole minutes left before the planned end, clamped at zero.
pub fn minutes_remaining(session: &TrainingSession, now: DateTime<Utc>) -> Option<i64> {
    end_at(session).map(|end| (end - now).num_minutes().max(0))
}

/// Share of the planned window already elapsed, in `0.0..=1.0`.
pub fn elapsed_fraction(session: &TrainingSession, now: DateTime<Utc>) -> Option<f64> {
    let start = session.start_at?;
    let total = session.duration_minutes()? as f64 * 60.0;
    let elapsed = (now - start).num_seconds() as f64;
    Some((elapsed / total).clamp(0.0, 1.0))
}
