//! Parking fee computation.

use chrono::{DateTime, Utc};

/// Fee for a completed session: fractional hours between entry and exit,
/// multiplied by the hourly rate. Partial hours are billed proportionally,
/// not rounded.
///
/// A negative duration (clock stepped backwards between entry and exit)
/// clamps to zero so a checkout never produces a negative bill.
pub fn parking_fee(entry: DateTime<Utc>, exit: DateTime<Utc>, hourly_rate: f64) -> f64 {
    let seconds = (exit - entry).num_seconds() as f64;
    let hours = (seconds / 3600.0).max(0.0);
    hours * hourly_rate
}
