// SPDX-License-Identifier: MIT

//! Weekly aggregate report model.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Derived weekly report for one user over a date range. Never persisted.
///
/// All aggregate fields are zero when no jogs match the range.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    /// Inclusive lower bound of the query, echoed unchanged
    pub from: DateTime<Utc>,
    /// Inclusive upper bound of the query, echoed unchanged
    pub to: DateTime<Utc>,
    /// Sum of distance over matching jogs
    pub total_distance: f64,
    /// Sum of time over matching jogs, in seconds
    pub total_time_seconds: f64,
    /// Mean time per jog, in seconds
    pub avg_time_seconds: f64,
    /// Mean of per-jog speeds (distance per hour), not a ratio of sums
    pub avg_speed: f64,
}
