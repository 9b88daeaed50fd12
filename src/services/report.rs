// SPDX-License-Identifier: MIT

//! Weekly report builder.
//!
//! Matches a user's jogs against a date range via the store adapter,
//! then folds sums and means over the match set in Rust.

use chrono::{DateTime, Utc};

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{Jog, WeeklyReport};

/// Builds derived weekly reports from stored jogs.
pub struct ReportService {
    db: FirestoreDb,
}

impl ReportService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Weekly aggregate for one user over `[from, to]` inclusive.
    pub async fn generate_weekly_report(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<WeeklyReport> {
        let jogs = self.db.jogs_in_range(user_id, from, to).await?;

        tracing::debug!(user_id, matched = jogs.len(), "Building weekly report");

        Ok(build_weekly_report(from, to, &jogs))
    }
}

/// Fold the match set into a report.
///
/// `avg_speed` is the mean of per-jog speeds, `distance / (time / 3600)`,
/// i.e. a mean-of-ratios. It is NOT total distance over total time; the
/// two disagree whenever jog durations differ.
pub fn build_weekly_report(from: DateTime<Utc>, to: DateTime<Utc>, jogs: &[Jog]) -> WeeklyReport {
    if jogs.is_empty() {
        return WeeklyReport {
            from,
            to,
            total_distance: 0.0,
            total_time_seconds: 0.0,
            avg_time_seconds: 0.0,
            avg_speed: 0.0,
        };
    }

    let count = jogs.len() as f64;
    let total_distance: f64 = jogs.iter().map(|j| j.distance).sum();
    let total_time_seconds: f64 = jogs.iter().map(|j| j.time_seconds).sum();
    let speed_sum: f64 = jogs
        .iter()
        .map(|j| j.distance / (j.time_seconds / 3600.0))
        .sum();

    WeeklyReport {
        from,
        to,
        total_distance,
        total_time_seconds,
        avg_time_seconds: total_time_seconds / count,
        avg_speed: speed_sum / count,
    }
}
