//! Time utilities for the inventory store
//!
//! `date_added` is wall-clock local time stored as ISO-8601 with second
//! precision and a UTC offset (`2026-10-19T14:03:11+02:00`). Older stores
//! wrote naive timestamps with microseconds and no offset
//! (`2026-10-19T14:03:11.123456`); those are still accepted on read and
//! interpreted in the local timezone.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Timelike};

/// Formats accepted for naive (offset-less) timestamps, tried in order.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Get the current local time truncated to whole seconds.
///
/// This is the precision the store persists, so a value taken here compares
/// equal to the same value read back from disk.
pub fn now() -> DateTime<Local> {
    let real_now = Local::now();
    real_now.with_nanosecond(0).unwrap_or(real_now)
}

/// Format a timestamp the way the store writes it.
pub fn format_timestamp(dt: &DateTime<Local>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and naive ISO-8601 (local time). Returns `None` for
/// anything else, or for a naive time that does not exist locally (DST gap).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(s, fmt).ok()?;
        let local = Local.from_local_datetime(&naive).earliest();
        if local.is_none() {
            tracing::warn!(timestamp = %s, "Naive timestamp does not exist in local timezone");
        }
        local
    })
}

/// Serde adapter for `date_added` columns.
///
/// Use with `#[serde(with = "inventory_util::iso8601")]`.
pub mod iso8601 {
    use chrono::{DateTime, Local};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", s)))
    }
}
