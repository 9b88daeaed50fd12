// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.
//!
//! Stored dates and query bounds must use one fixed-precision RFC3339
//! rendering: Firestore compares the strings byte-wise, and variable
//! fractional-second groups do not sort chronologically ('.' < 'Z').

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with fixed nanosecond precision
/// and a `Z` suffix. Lexicographic order equals chronological order.
pub fn format_fixed_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Serde adapter for timestamp fields stored in Firestore.
///
/// Serializes with [`format_fixed_rfc3339`]; accepts any RFC3339 form
/// on deserialization.
pub mod rfc3339_fixed {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_fixed_rfc3339(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
