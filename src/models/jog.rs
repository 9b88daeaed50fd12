// SPDX-License-Identifier: MIT

//! Jog record model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Geographic location of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    /// Latitude in degrees
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    /// Longitude in degrees
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

/// Stored jog record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jog {
    /// Document id, assigned by the store adapter on creation
    pub id: String,
    /// Id of the owning user, attached at create time and immutable after
    pub user_id: String,
    /// Elapsed duration in seconds
    pub time_seconds: f64,
    /// Distance covered (unit-agnostic; speeds are distance per hour)
    pub distance: f64,
    /// When the run took place (UTC). Stored with fixed precision so
    /// Firestore's byte-wise comparison matches chronological order.
    #[serde(with = "crate::time_utils::rfc3339_fixed")]
    pub date: DateTime<Utc>,
    /// Where the run took place
    pub location: Location,
}

/// Payload for creating a jog. All fields required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJogRequest {
    /// Elapsed duration in seconds, strictly positive
    #[validate(range(exclusive_min = 0.0))]
    pub time_seconds: f64,
    /// Distance covered, strictly positive
    #[validate(range(exclusive_min = 0.0))]
    pub distance: f64,
    /// When the run took place (RFC 3339)
    pub date: DateTime<Utc>,
    #[validate(nested)]
    pub location: Location,
}

/// Payload for updating a jog. Absent fields keep their stored value.
///
/// The owning user is not patchable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJogRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub time_seconds: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    pub distance: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    #[validate(nested)]
    pub location: Option<Location>,
}

impl UpdateJogRequest {
    /// Apply the present fields onto an existing record.
    pub fn apply_to(&self, jog: &mut Jog) {
        if let Some(time_seconds) = self.time_seconds {
            jog.time_seconds = time_seconds;
        }
        if let Some(distance) = self.distance {
            jog.distance = distance;
        }
        if let Some(date) = self.date {
            jog.date = date;
        }
        if let Some(location) = self.location.clone() {
            jog.location = location;
        }
    }
}
